#![allow(dead_code)]

use std::collections::HashMap;

use wiremock::{MockServer, Request};
use zulip_api_rs::{Config, Zulip};

pub const EMAIL: &str = "bot@example.com";
pub const API_KEY: &str = "secret-key";
/// `Basic base64("bot@example.com:secret-key")`.
pub const BASIC_AUTH: &str = "Basic Ym90QGV4YW1wbGUuY29tOnNlY3JldC1rZXk=";

/// A client pointed at the mock server's realm.
pub fn client(server: &MockServer) -> Zulip {
    Zulip::new(Config::new(&server.uri(), EMAIL, API_KEY).unwrap()).unwrap()
}

/// Decodes a form-encoded request body.
pub fn form(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body).into_owned().collect()
}

/// Decodes a request's query string.
pub fn query(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}
