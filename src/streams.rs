//! Listing streams and managing the account's subscriptions.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    transport::Transport,
    utils::{encode_bool, encode_json, Params},
};

/// A stream, or a subscription to one (which carries extra per-user fields).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub stream_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub invite_only: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which streams [`Streams::list`] returns.
#[derive(Clone, Debug)]
pub struct ListStreamsOptions {
    pub include_public: bool,
    pub include_subscribed: bool,
    pub include_all_active: bool,
    pub include_default: bool,
}

impl Default for ListStreamsOptions {
    fn default() -> Self {
        Self {
            include_public: true,
            include_subscribed: true,
            include_all_active: false,
            include_default: false,
        }
    }
}

/// A stream to subscribe to; created if it does not exist yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StreamSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StreamSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Result of [`Streams::subscribe`], keyed by user email.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SubscribeOutcome {
    #[serde(default)]
    pub subscribed: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub already_subscribed: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub unauthorized: Vec<String>,
}

/// Result of [`Streams::unsubscribe`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UnsubscribeOutcome {
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub not_removed: Vec<String>,
}

#[derive(Deserialize)]
struct StreamList {
    streams: Vec<Stream>,
}

#[derive(Deserialize)]
struct SubscriptionList {
    subscriptions: Vec<Stream>,
}

#[derive(Deserialize)]
struct StreamId {
    stream_id: u64,
}

fn check_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut count = 0;
    for name in names {
        if name.trim().is_empty() {
            return Err(Error::InvalidSubscriptions(format!("stream {count} has an empty name")));
        }
        count += 1;
    }
    if count == 0 {
        return Err(Error::InvalidSubscriptions("no streams given".into()));
    }
    Ok(())
}

/// Client for the stream and subscription endpoints.
#[derive(Clone, Debug)]
pub struct Streams {
    transport: Transport,
}

impl Streams {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists streams visible to the account. `GET /streams`.
    pub async fn list(&self, options: &ListStreamsOptions) -> Result<Vec<Stream>> {
        let params: Params = vec![
            ("include_public", encode_bool(options.include_public)),
            ("include_subscribed", encode_bool(options.include_subscribed)),
            ("include_all_active", encode_bool(options.include_all_active)),
            ("include_default", encode_bool(options.include_default)),
        ];
        let list: StreamList = self.transport.request(Method::GET, "streams", &params).await?;
        Ok(list.streams)
    }

    /// Looks up a stream id by name. `GET /get_stream_id`.
    pub async fn id_of(&self, name: &str) -> Result<u64> {
        if name.trim().is_empty() {
            return Err(Error::MissingParameter("stream"));
        }
        let params: Params = vec![("stream", name.to_string())];
        let found: StreamId = self.transport.request(Method::GET, "get_stream_id", &params).await?;
        Ok(found.stream_id)
    }

    /// The account's current subscriptions. `GET /users/me/subscriptions`.
    pub async fn subscriptions(&self) -> Result<Vec<Stream>> {
        let list: SubscriptionList = self
            .transport
            .request(Method::GET, "users/me/subscriptions", &Params::new())
            .await?;
        Ok(list.subscriptions)
    }

    /// Subscribes the account, or `principals` when given, to `streams`.
    /// `POST /users/me/subscriptions`.
    pub async fn subscribe(&self, streams: &[StreamSpec], principals: &[String]) -> Result<SubscribeOutcome> {
        check_names(streams.iter().map(|s| s.name.as_str()))?;
        let mut params: Params = vec![("subscriptions", encode_json(streams, Error::InvalidSubscriptions)?)];
        if !principals.is_empty() {
            params.push(("principals", encode_json(principals, Error::InvalidSubscriptions)?));
        }
        self.transport
            .request(Method::POST, "users/me/subscriptions", &params)
            .await
    }

    /// Unsubscribes the account from the named streams. `DELETE /users/me/subscriptions`.
    pub async fn unsubscribe(&self, names: &[String]) -> Result<UnsubscribeOutcome> {
        check_names(names.iter().map(String::as_str))?;
        let params: Params = vec![("subscriptions", encode_json(names, Error::InvalidSubscriptions)?)];
        self.transport
            .request(Method::DELETE, "users/me/subscriptions", &params)
            .await
    }
}
