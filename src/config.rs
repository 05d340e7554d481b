//! Connection settings for a Zulip realm.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Path appended to the realm URL to reach the REST API.
const API_PATH: &str = "api/v1/";

pub const ENV_REALM_URL: &str = "ZULIP_REALM_URL";
pub const ENV_EMAIL: &str = "ZULIP_EMAIL";
pub const ENV_API_KEY: &str = "ZULIP_API_KEY";

/// Immutable credentials and endpoints for one realm.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    realm_url: Url,
    api_root_url: Url,
    email: String,
    api_key: String,
}

impl Config {
    /// Builds a config from a realm URL (e.g. `https://chat.example.com`) and
    /// the account's static credentials.
    ///
    /// Blank credentials are rejected with [`Error::MissingParameter`].
    pub fn new(realm_url: &str, email: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let (email, api_key) = (email.into(), api_key.into());
        if email.trim().is_empty() {
            return Err(Error::MissingParameter("email"));
        }
        if api_key.trim().is_empty() {
            return Err(Error::MissingParameter("api_key"));
        }
        let mut realm_url = Url::parse(realm_url.trim())?;
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !realm_url.path().ends_with('/') {
            let path = format!("{}/", realm_url.path());
            realm_url.set_path(&path);
        }
        let api_root_url = realm_url.join(API_PATH)?;
        Ok(Self {
            realm_url,
            api_root_url,
            email,
            api_key,
        })
    }

    /// Reads `ZULIP_REALM_URL`, `ZULIP_EMAIL` and `ZULIP_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &'static str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or(Error::MissingConfig(name))
        };
        Self::new(&var(ENV_REALM_URL)?, var(ENV_EMAIL)?, var(ENV_API_KEY)?)
    }

    pub fn realm_url(&self) -> &Url {
        &self.realm_url
    }

    /// The realm URL with the API path appended, always ending in `/`.
    pub fn api_root_url(&self) -> &Url {
        &self.api_root_url
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Resolves an endpoint such as `events` or `messages/42` against the API root.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.api_root_url.join(endpoint.trim_start_matches('/'))?)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("realm_url", &self.realm_url.as_str())
            .field("api_root_url", &self.api_root_url.as_str())
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
