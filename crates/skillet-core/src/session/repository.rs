//! Session persistence trait.

use super::model::AuthSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting the authentication session.
///
/// This decouples the auth usecase from the storage mechanism (a JSON file
/// under the platform config directory in production, an in-memory map in
/// tests). The persisted token + user pair is the client's entire durable
/// state.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted session.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet (fresh
    /// install or after logout).
    async fn load(&self) -> Result<Option<AuthSession>>;

    /// Persists the session after a successful auth exchange.
    async fn save(&self, session: &AuthSession) -> Result<()>;

    /// Removes the persisted session on logout.
    async fn clear(&self) -> Result<()>;
}
