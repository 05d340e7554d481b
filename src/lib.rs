//! # Zulip HTTP API
//!
//! An async client for the Zulip REST API. It covers:
//!
//! - Event queues: register, long-poll and delete (see [`events`])
//! - Messages: send, fetch, render, edit and delete
//! - Streams: list, look up, subscribe and unsubscribe
//! - Users: list, fetch and create
//!
//! Every call issues at most one HTTP request and resolves once, to the typed
//! payload or an [`Error`]. Nothing is retried. Cursor management for event
//! queues stays with the caller.
//!
//! For usage examples, see `demos/listen.rs`.

pub mod config;
pub mod error;
pub mod event;
pub mod events;
pub mod messages;
pub mod narrow;
pub mod response;
pub mod streams;
pub mod transport;
pub mod users;
pub mod utils;
pub mod zulip;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{Event, EventQueue};
pub use events::{Events, RegisterOptions, ALL_EVENTS};
pub use messages::{Anchor, GetMessagesOptions, MessageUpdate, Messages, PropagateMode, Recipient};
pub use narrow::Narrow;
pub use streams::{ListStreamsOptions, StreamSpec, Streams};
pub use transport::Transport;
pub use users::{NewUser, Users};
pub use zulip::Zulip;
