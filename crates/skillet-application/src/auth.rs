//! Authentication usecase: wires the auth API, the in-memory session store
//! and the on-disk session repository.

use skillet_client::api::{AuthApi, ProfileUpdate, Registration};
use skillet_core::error::Result;
use skillet_core::model::UserAccount;
use skillet_core::session::{SessionRepository, SessionStore};
use std::sync::Arc;

/// Login/logout and profile flows.
///
/// Every successful exchange writes the [`SessionStore`] first (so requests
/// already in the send path pick up the token) and then persists the
/// snapshot. Login and logout are user-serialized; no concurrent race is
/// defended against.
pub struct AuthService {
    api: AuthApi,
    store: SessionStore,
    repository: Arc<dyn SessionRepository>,
}

impl AuthService {
    pub fn new(api: AuthApi, store: SessionStore, repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            api,
            store,
            repository,
        }
    }

    /// Restores a persisted session at startup. Returns whether a signed-in
    /// session was found.
    pub async fn restore(&self) -> Result<bool> {
        match self.repository.load().await? {
            Some(session) if session.is_authenticated() => {
                self.store.replace(session);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        let exchange = self.api.login(email, password).await?;
        self.store.set(exchange.token, exchange.user.clone());
        self.repository.save(&self.store.snapshot()).await?;
        tracing::info!("signed in as {}", exchange.user.username);
        Ok(exchange.user)
    }

    pub async fn login_with_google(&self, credential: &str) -> Result<UserAccount> {
        let exchange = self.api.login_with_google(credential).await?;
        self.store.set(exchange.token, exchange.user.clone());
        self.repository.save(&self.store.snapshot()).await?;
        Ok(exchange.user)
    }

    /// Registers a new account. The caller signs in separately.
    pub async fn register(&self, registration: &Registration) -> Result<UserAccount> {
        self.api.register(registration).await
    }

    /// Updates profile fields and refreshes the stored user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserAccount> {
        let user = self.api.update_profile(update).await?;
        self.store.set_user(user.clone());
        self.repository.save(&self.store.snapshot()).await?;
        Ok(user)
    }

    /// Clears both the in-memory session and the persisted one.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear();
        self.repository.clear().await
    }
}
