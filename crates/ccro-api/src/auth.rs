// Authentication endpoints
//
// Login is one opaque call that answers with the authenticated user. No
// token or cookie is retained by the client.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EntityId, User};

impl ApiClient {
    /// Authenticate with username/password.
    ///
    /// `POST /auth/login`. Bad credentials surface as `Error::Http` with
    /// the backend's status (typically 401).
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<User, Error> {
        debug!(username, "logging in");
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        self.post(&["auth", "login"], &body).await
    }

    /// `GET /auth/user/{id}`
    pub async fn get_user(&self, id: &EntityId) -> Result<User, Error> {
        self.get(&["auth", "user", &id.to_string()]).await
    }
}
