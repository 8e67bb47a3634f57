//! Per-item social interaction state.

use super::comment::Comment;
use serde::{Deserialize, Serialize};

/// The like flag and its dependent count, kept in one value.
///
/// Keeping both in a single struct is what makes optimistic rollback atomic:
/// the overlay restores the whole value, never the flag without the count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub like_count: u64,
}

impl LikeState {
    /// The state after the viewer toggles the like button.
    pub fn toggled(self) -> Self {
        if self.liked {
            Self {
                liked: false,
                like_count: self.like_count.saturating_sub(1),
            }
        } else {
            Self {
                liked: true,
                like_count: self.like_count + 1,
            }
        }
    }
}

/// Render snapshot of one item's interactions for a given viewer.
///
/// Built lazily on first view, refreshed on reconciliation, discarded with
/// the owning panel. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    pub item_id: String,
    pub liked: bool,
    pub like_count: u64,
    pub comments: Vec<Comment>,
    pub comment_count: usize,
}
