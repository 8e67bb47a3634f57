//! Deduplicated per-id user lookup.

use skillet_client::api::UsersApi;
use skillet_core::error::Result;
use skillet_core::model::UserSummary;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Shared user cache with at-most-one in-flight fetch per id.
///
/// Concurrent callers for the same id share a single request; callers
/// arriving after a result exists get the cached value without touching the
/// network. A failed fetch leaves the cell empty so a later call may retry.
pub struct UserDirectory {
    api: UsersApi,
    cells: Mutex<HashMap<String, Arc<OnceCell<UserSummary>>>>,
}

impl UserDirectory {
    pub fn new(api: UsersApi) -> Self {
        Self {
            api,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches a user, deduplicating concurrent requests for the same id.
    pub async fn fetch(&self, user_id: &str) -> Result<UserSummary> {
        let cell = {
            let mut cells = self.cells.lock().expect("directory lock poisoned");
            Arc::clone(
                cells
                    .entry(user_id.to_string())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let user = cell
            .get_or_try_init(|| self.api.get(user_id))
            .await?;
        Ok(user.clone())
    }

    /// The cached user, if a fetch has completed.
    pub fn cached(&self, user_id: &str) -> Option<UserSummary> {
        let cells = self.cells.lock().expect("directory lock poisoned");
        cells.get(user_id).and_then(|cell| cell.get().cloned())
    }
}
