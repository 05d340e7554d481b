//! Sending, fetching, rendering and editing messages.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    narrow::Narrow,
    transport::Transport,
    utils::{encode_bool, encode_json, Params},
};

/// Where a message goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    /// A topic within a stream.
    Stream { name: String, topic: String },
    /// A direct (private) conversation with the given users, by email.
    Direct(Vec<String>),
}

impl Recipient {
    pub fn stream(name: impl Into<String>, topic: impl Into<String>) -> Self {
        Recipient::Stream {
            name: name.into(),
            topic: topic.into(),
        }
    }

    pub fn direct<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recipient::Direct(emails.into_iter().map(Into::into).collect())
    }

    fn to_params(&self) -> Result<Params> {
        match self {
            Recipient::Stream { name, topic } => {
                if name.trim().is_empty() {
                    return Err(Error::InvalidRecipients("stream name is empty".into()));
                }
                Ok(vec![
                    ("type", "stream".to_string()),
                    ("to", name.clone()),
                    ("topic", topic.clone()),
                ])
            }
            Recipient::Direct(emails) => {
                if emails.is_empty() {
                    return Err(Error::InvalidRecipients("no recipients given".into()));
                }
                if let Some(index) = emails.iter().position(|e| e.trim().is_empty()) {
                    return Err(Error::InvalidRecipients(format!("recipient {index} is empty")));
                }
                Ok(vec![
                    ("type", "private".to_string()),
                    ("to", encode_json(emails, Error::InvalidRecipients)?),
                ])
            }
        }
    }
}

/// Point in the message history to fetch around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Newest,
    Oldest,
    FirstUnread,
    Id(u64),
}

impl Anchor {
    fn as_param(&self) -> String {
        match self {
            Anchor::Newest => "newest".to_string(),
            Anchor::Oldest => "oldest".to_string(),
            Anchor::FirstUnread => "first_unread".to_string(),
            Anchor::Id(id) => id.to_string(),
        }
    }
}

/// Parameters for [`Messages::get`].
#[derive(Clone, Debug)]
pub struct GetMessagesOptions {
    pub anchor: Anchor,
    pub num_before: u32,
    pub num_after: u32,
    pub narrow: Narrow,
    pub apply_markdown: bool,
    pub client_gravatar: bool,
}

impl Default for GetMessagesOptions {
    fn default() -> Self {
        Self {
            anchor: Anchor::Newest,
            num_before: 20,
            num_after: 0,
            narrow: Narrow::empty(),
            apply_markdown: true,
            client_gravatar: false,
        }
    }
}

/// A message as returned by `GET /messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender_id: u64,
    pub sender_email: String,
    pub sender_full_name: String,
    pub content: String,
    #[serde(rename = "subject", default)]
    pub topic: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub stream_id: Option<u64>,
    /// Stream name for stream messages, list of users for direct ones.
    pub display_recipient: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of message history.
#[derive(Clone, Debug, Deserialize)]
pub struct MessagesPage {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub found_anchor: bool,
    #[serde(default)]
    pub found_newest: bool,
    #[serde(default)]
    pub found_oldest: bool,
}

/// How a topic change spreads to neighbouring messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagateMode {
    ChangeOne,
    ChangeLater,
    ChangeAll,
}

impl PropagateMode {
    fn as_str(&self) -> &'static str {
        match self {
            PropagateMode::ChangeOne => "change_one",
            PropagateMode::ChangeLater => "change_later",
            PropagateMode::ChangeAll => "change_all",
        }
    }
}

/// Changes applied by [`Messages::update`]. At least one of `content` or `topic` is required.
#[derive(Clone, Debug, Default)]
pub struct MessageUpdate {
    pub content: Option<String>,
    pub topic: Option<String>,
    pub propagate_mode: Option<PropagateMode>,
}

#[derive(Deserialize)]
struct SentMessage {
    id: u64,
}

#[derive(Deserialize)]
struct RenderedMessage {
    rendered: String,
}

/// Client for the message endpoints.
#[derive(Clone, Debug)]
pub struct Messages {
    transport: Transport,
}

impl Messages {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Sends a message and returns its id. `POST /messages`.
    pub async fn send(&self, to: &Recipient, content: &str) -> Result<u64> {
        let mut params = to.to_params()?;
        params.push(("content", content.to_string()));
        let sent: SentMessage = self.transport.request(Method::POST, "messages", &params).await?;
        Ok(sent.id)
    }

    /// Fetches a page of messages. `GET /messages`.
    pub async fn get(&self, options: &GetMessagesOptions) -> Result<MessagesPage> {
        let params: Params = vec![
            ("anchor", options.anchor.as_param()),
            ("num_before", options.num_before.to_string()),
            ("num_after", options.num_after.to_string()),
            ("narrow", options.narrow.to_json()?),
            ("apply_markdown", encode_bool(options.apply_markdown)),
            ("client_gravatar", encode_bool(options.client_gravatar)),
        ];
        self.transport.request(Method::GET, "messages", &params).await
    }

    /// Renders message markup to HTML without sending it. `POST /messages/render`.
    pub async fn render(&self, content: &str) -> Result<String> {
        let params: Params = vec![("content", content.to_string())];
        let rendered: RenderedMessage = self.transport.request(Method::POST, "messages/render", &params).await?;
        Ok(rendered.rendered)
    }

    /// Edits a message's content and/or topic. `PATCH /messages/{id}`.
    pub async fn update(&self, message_id: u64, update: &MessageUpdate) -> Result<()> {
        if update.content.is_none() && update.topic.is_none() {
            return Err(Error::MissingParameter("content or topic"));
        }
        let mut params = Params::new();
        if let Some(content) = &update.content {
            params.push(("content", content.clone()));
        }
        if let Some(topic) = &update.topic {
            params.push(("topic", topic.clone()));
        }
        if let Some(mode) = update.propagate_mode {
            params.push(("propagate_mode", mode.as_str().to_string()));
        }
        let endpoint = format!("messages/{message_id}");
        self.transport.request_empty(Method::PATCH, &endpoint, &params).await
    }

    /// Deletes a message. `DELETE /messages/{id}`.
    pub async fn delete(&self, message_id: u64) -> Result<()> {
        let endpoint = format!("messages/{message_id}");
        self.transport.request_empty(Method::DELETE, &endpoint, &Params::new()).await
    }
}
