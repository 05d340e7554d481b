//! Event queue types returned by the events API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A server-side event queue and the caller's position in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventQueue {
    pub queue_id: String,
    pub last_event_id: i64,
    /// Initial state fetched alongside registration (`realm_users`, `subscriptions`, ...).
    #[serde(flatten)]
    pub state: Map<String, Value>,
}

impl EventQueue {
    /// Moves the cursor to the highest event id in `events`. Never moves it back.
    pub fn advance(&mut self, events: &[Event]) {
        if let Some(max) = events.iter().map(|e| e.id).max() {
            self.last_event_id = self.last_event_id.max(max);
        }
    }
}

/// One event delivered by the queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Every other field of the event, untouched.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Event {
    /// True for the keep-alive events the server emits while long-polling.
    pub fn is_heartbeat(&self) -> bool {
        self.kind == "heartbeat"
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.id, self.kind, Value::Object(self.data.clone()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsPayload {
    pub events: Vec<Event>,
}
