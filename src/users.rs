//! Looking up and creating users.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    transport::Transport,
    utils::{encode_bool, Params},
};

/// A realm member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn active_by_default() -> bool {
    true
}

/// Account details for [`Users::create`].
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Deserialize)]
struct Members {
    members: Vec<User>,
}

#[derive(Deserialize)]
struct SingleUser {
    user: User,
}

#[derive(Deserialize)]
struct CreatedUser {
    user_id: u64,
}

/// Client for the user endpoints.
#[derive(Clone, Debug)]
pub struct Users {
    transport: Transport,
}

impl Users {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists every member of the realm. `GET /users`.
    pub async fn list(&self, client_gravatar: bool) -> Result<Vec<User>> {
        let params: Params = vec![("client_gravatar", encode_bool(client_gravatar))];
        let members: Members = self.transport.request(Method::GET, "users", &params).await?;
        Ok(members.members)
    }

    /// The authenticated account's profile. `GET /users/me`.
    pub async fn me(&self) -> Result<User> {
        self.transport.request(Method::GET, "users/me", &Params::new()).await
    }

    /// A single user by id. `GET /users/{id}`.
    pub async fn get(&self, user_id: u64) -> Result<User> {
        let endpoint = format!("users/{user_id}");
        let found: SingleUser = self.transport.request(Method::GET, &endpoint, &Params::new()).await?;
        Ok(found.user)
    }

    /// Creates an account and returns its id. `POST /users`.
    pub async fn create(&self, user: &NewUser) -> Result<u64> {
        if user.email.trim().is_empty() {
            return Err(Error::MissingParameter("email"));
        }
        if user.password.is_empty() {
            return Err(Error::MissingParameter("password"));
        }
        if user.full_name.trim().is_empty() {
            return Err(Error::MissingParameter("full_name"));
        }
        let params: Params = vec![
            ("email", user.email.clone()),
            ("password", user.password.clone()),
            ("full_name", user.full_name.clone()),
        ];
        let created: CreatedUser = self.transport.request(Method::POST, "users", &params).await?;
        Ok(created.user_id)
    }
}
