//! Authenticated HTTP plumbing shared by all domain clients.

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    response,
    utils::Params,
};

/// Sends requests to one realm with the account's basic-auth credentials.
///
/// Cloning is cheap: the HTTP client is pooled internally and the config is
/// shared read-only.
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    config: Arc<Config>,
}

impl Transport {
    /// Creates a transport with a default HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?, Arc::new(config)))
    }

    /// Creates a transport around a caller-built HTTP client.
    ///
    /// Timeouts are whatever `client` carries; long-polling `events` calls
    /// need minutes, not seconds.
    pub fn with_client(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issues one request and decodes the success payload into `T`.
    pub async fn request<T: DeserializeOwned>(&self, method: Method, endpoint: &str, params: &Params) -> Result<T> {
        let payload = self.request_raw(method, endpoint, params).await?;
        response::decode(payload)
    }

    /// Issues one request whose success payload carries nothing of interest.
    pub async fn request_empty(&self, method: Method, endpoint: &str, params: &Params) -> Result<()> {
        self.request_raw(method, endpoint, params).await.map(|_| ())
    }

    /// Issues one request and returns the classified payload map.
    ///
    /// GET sends `params` as the query string, every other method as a
    /// form-encoded body.
    pub async fn request_raw(&self, method: Method, endpoint: &str, params: &Params) -> Result<Map<String, Value>> {
        let url = self.config.endpoint_url(endpoint)?;
        debug!(%method, endpoint, "sending request");

        let mut req = self
            .client
            .request(method.clone(), url)
            .basic_auth(self.config.email(), Some(self.config.api_key()));
        req = if method == Method::GET {
            req.query(params)
        } else {
            req.form(params)
        };

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(%method, endpoint, status, "received response");

        response::classify(status, &body).map_err(|err| {
            match &err {
                Error::Api { message, code } => {
                    warn!(%method, endpoint, status, code = code.as_deref(), "API error: {}", message)
                }
                other => warn!(%method, endpoint, status, "unusable response: {}", other),
            }
            err
        })
    }
}
