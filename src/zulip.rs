//! # Zulip Client
//!
//! [`Zulip`] bundles one [`Transport`] and hands out the domain clients. Each
//! client is a cheap clone of the shared transport, so they can be moved into
//! separate tasks freely. Callers who prefer explicit wiring can build a
//! [`Transport`] themselves and pass it to [`Events::new`], [`Messages::new`],
//! and so on.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Config,
    error::Result,
    events::Events,
    messages::Messages,
    streams::Streams,
    transport::Transport,
    users::Users,
};

/// Entry point for one realm and account.
#[derive(Clone, Debug)]
pub struct Zulip {
    transport: Transport,
}

impl Zulip {
    /// Creates a client with a default HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Creates a client around a caller-built HTTP client (timeouts, proxies, ...).
    pub fn with_client(config: Config, client: Client) -> Self {
        Self {
            transport: Transport::with_client(client, Arc::new(config)),
        }
    }

    /// Builds the config from `ZULIP_REALM_URL`, `ZULIP_EMAIL` and `ZULIP_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        self.transport.config()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn events(&self) -> Events {
        Events::new(self.transport.clone())
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.transport.clone())
    }

    pub fn streams(&self) -> Streams {
        Streams::new(self.transport.clone())
    }

    pub fn users(&self) -> Users {
        Users::new(self.transport.clone())
    }
}
