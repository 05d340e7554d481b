//! # Events
//!
//! Register, poll and delete server-side event queues.
//!
//! The client keeps no state between calls: the queue id and the
//! `last_event_id` cursor live with the caller, who loops over [`Events::get`]
//! and advances the cursor (see [`EventQueue::advance`]). There is no built-in
//! polling loop, retry or reconnection.

use reqwest::Method;
use tracing::debug;

use crate::{
    error::{Error, Result},
    event::{Event, EventQueue, EventsPayload},
    narrow::Narrow,
    transport::Transport,
    utils::{encode_bool, encode_json, Params},
};

/// Pass as `last_event_id` to receive every buffered event.
pub const ALL_EVENTS: i64 = -1;

/// Parameters for [`Events::register`].
#[derive(Clone, Debug, Default)]
pub struct RegisterOptions {
    pub apply_markdown: bool,
    pub client_gravatar: bool,
    pub event_types: Vec<String>,
    pub all_public_streams: bool,
    pub include_subscribers: bool,
    pub fetch_event_types: Vec<String>,
    pub narrow: Narrow,
}

impl RegisterOptions {
    /// Encodes the options, failing before any network traffic if a list cannot be serialized.
    fn to_params(&self) -> Result<Params> {
        let event_types = encode_json(&self.event_types, Error::InvalidEventTypes)?;
        let fetch_event_types = encode_json(&self.fetch_event_types, Error::InvalidFetchEventTypes)?;
        let narrow = self.narrow.to_json()?;
        Ok(vec![
            ("apply_markdown", encode_bool(self.apply_markdown)),
            ("client_gravatar", encode_bool(self.client_gravatar)),
            ("event_types", event_types),
            ("all_public_streams", encode_bool(self.all_public_streams)),
            ("include_subscribers", encode_bool(self.include_subscribers)),
            ("fetch_event_types", fetch_event_types),
            ("narrow", narrow),
        ])
    }
}

/// Client for the event queue endpoints.
#[derive(Clone, Debug)]
pub struct Events {
    transport: Transport,
}

impl Events {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Creates a queue. `POST /register`.
    pub async fn register(&self, options: &RegisterOptions) -> Result<EventQueue> {
        let params = options.to_params()?;
        let queue: EventQueue = self.transport.request(Method::POST, "register", &params).await?;
        debug!(queue_id = %queue.queue_id, last_event_id = queue.last_event_id, "registered event queue");
        Ok(queue)
    }

    /// Fetches events after `last_event_id`. `GET /events`.
    ///
    /// Unless `dont_block` is set the server holds the request open until an
    /// event or a heartbeat is available, which can take minutes.
    pub async fn get(&self, queue_id: &str, last_event_id: i64, dont_block: bool) -> Result<Vec<Event>> {
        let params: Params = vec![
            ("queue_id", queue_id.to_string()),
            ("last_event_id", last_event_id.to_string()),
            ("dont_block", encode_bool(dont_block)),
        ];
        let payload: EventsPayload = self.transport.request(Method::GET, "events", &params).await?;
        debug!(queue_id, count = payload.events.len(), "polled events");
        Ok(payload.events)
    }

    /// Destroys a queue. `DELETE /events`.
    pub async fn delete_queue(&self, queue_id: &str) -> Result<()> {
        let params: Params = vec![("queue_id", queue_id.to_string())];
        self.transport.request_empty(Method::DELETE, "events", &params).await?;
        debug!(queue_id, "deleted event queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a Params, key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing param {key}"))
    }

    #[test]
    fn default_options_encode_defaults() {
        let params = RegisterOptions::default().to_params().unwrap();
        assert_eq!(param(&params, "apply_markdown"), "false");
        assert_eq!(param(&params, "event_types"), "[]");
        assert_eq!(param(&params, "fetch_event_types"), "[]");
        assert_eq!(param(&params, "narrow"), "[[]]");
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn structured_fields_are_sent_as_given() {
        let options = RegisterOptions {
            event_types: vec!["".into()],
            fetch_event_types: vec!["realm user".into()],
            narrow: Narrow::from(vec![vec!["is:private".to_string()]]),
            ..Default::default()
        };
        let params = options.to_params().unwrap();
        assert_eq!(param(&params, "event_types"), r#"[""]"#);
        assert_eq!(param(&params, "fetch_event_types"), r#"["realm user"]"#);
        assert_eq!(param(&params, "narrow"), r#"[["is:private"]]"#);
    }
}
