//! Authentication endpoints.

use crate::client::ApiClient;
use serde::{Deserialize, Serialize};
use skillet_core::error::Result;
use skillet_core::model::UserAccount;
use std::sync::Arc;

/// Typed wrapper over `/api/auth`.
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token + user pair.
    ///
    /// The backend accepts a username in the `email` field as well.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthExchange> {
        self.client
            .post_json("/api/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Registers a new account. The caller logs in separately afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<UserAccount> {
        self.client.post_json("/api/auth/register", registration).await
    }

    /// Exchanges a Google ID token for a session.
    pub async fn login_with_google(&self, credential: &str) -> Result<AuthExchange> {
        self.client
            .post_json("/api/auth/google", &GoogleRequest { credential })
            .await
    }

    /// Updates the signed-in user's profile fields.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserAccount> {
        self.client.post_json("/api/auth/update-profile", update).await
    }
}

/// A successful login/registration exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthExchange {
    pub token: String,
    pub user: UserAccount,
}

/// New-account payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub id: String,
    pub full_name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct GoogleRequest<'a> {
    credential: &'a str,
}
