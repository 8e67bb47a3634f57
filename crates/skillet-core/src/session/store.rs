//! Shared in-memory session handle.

use super::model::AuthSession;
use crate::model::user::UserAccount;
use std::sync::{Arc, RwLock};

/// Cloneable handle to the process-wide [`AuthSession`].
///
/// The HTTP client reads this at send time (inside the attempt loop, not at
/// request construction), so a token written between construction and
/// dispatch (or between retry attempts) is observed. Writes happen only from
/// the login/logout usecase, which is user-serialized.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<AuthSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a restored session.
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// The current bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").token.clone()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<UserAccount> {
        self.inner.read().expect("session lock poisoned").user.clone()
    }

    /// The signed-in user's id, if any.
    pub fn user_id(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .user_id()
            .map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_authenticated()
    }

    /// A point-in-time copy of the whole session (for persistence).
    pub fn snapshot(&self) -> AuthSession {
        self.inner.read().expect("session lock poisoned").clone()
    }

    /// Installs a session after a successful auth exchange.
    pub fn set(&self, token: String, user: UserAccount) {
        let mut session = self.inner.write().expect("session lock poisoned");
        session.token = Some(token);
        session.user = Some(user);
    }

    /// Replaces the stored user (e.g. after a profile update).
    pub fn set_user(&self, user: UserAccount) {
        self.inner.write().expect("session lock poisoned").user = Some(user);
    }

    /// Replaces the whole session (e.g. restored from disk at startup).
    pub fn replace(&self, session: AuthSession) {
        *self.inner.write().expect("session lock poisoned") = session;
    }

    /// Clears the session on logout.
    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = AuthSession::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: &str) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            username: "cook".to_string(),
            email: "cook@example.com".to_string(),
            full_name: None,
            bio: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_set_and_clear() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);

        store.set("jwt-token".to_string(), test_user("u1"));
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("jwt-token"));
        assert_eq!(store.user_id().as_deref(), Some("u1"));

        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let seen_by_client = store.clone();
        store.set("t".to_string(), test_user("u1"));
        // A token installed after the clone was handed out is observed.
        assert_eq!(seen_by_client.token().as_deref(), Some("t"));
    }
}
