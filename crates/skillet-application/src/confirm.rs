//! Confirmation gate for destructive operations.
//!
//! Optimistic rollback cannot undo a user's false impression that a
//! deletion succeeded, so destructive mutations are two-step: the owning
//! service hands out a [`DeleteTicket`] from `stage_delete`, the UI shows
//! its confirmation dialog, and only `confirm_delete(ticket)` dispatches
//! anything. Dropping the ticket cancels the deletion.

/// Proof that a specific deletion was staged and confirmed by the user.
///
/// Cannot be constructed outside this crate; the only way to obtain one is
/// through a service's `stage_delete`.
#[derive(Debug)]
pub struct DeleteTicket {
    target_id: String,
}

impl DeleteTicket {
    pub(crate) fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
        }
    }

    /// The id of the entity this ticket authorizes deleting.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }
}
