//! Authentication session domain model.

use crate::model::user::UserAccount;
use serde::{Deserialize, Serialize};

/// The process-wide authentication state.
///
/// Created by a successful login/registration exchange, read by every
/// outgoing request at send time, cleared on logout. This plus the matching
/// `config.toml` is the entire durable client state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for the `Authorization` header, if signed in.
    pub token: Option<String>,
    /// The signed-in user account, if any.
    pub user: Option<UserAccount>,
}

impl AuthSession {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The signed-in user's id, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}
