//! Generic optimistic-edit overlay.
//!
//! Every toggle-style interaction (like, follow, comment edit) shares the
//! same shape: capture the current value, render the proposed one
//! immediately, then either confirm (possibly with canonical server data) or
//! roll back to exactly the captured value when the request fails. This
//! module factors that shape out once so no widget can get the rollback
//! half-right.
//!
//! At most one edit may be pending per wrapped field; a second `begin` while
//! one is pending is rejected with [`SkilletError::Conflict`], which is how
//! the UI-layer "button disabled while in flight" rule is enforced.

use crate::error::{Result, SkilletError};

/// Settlement status of an optimistic edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// No edit has been applied since the last settlement.
    Idle,
    /// A proposed value is rendered and awaiting reconciliation.
    Pending,
    /// The last edit settled as confirmed.
    Confirmed,
    /// The last edit was rolled back to its captured value.
    RolledBack,
}

/// The captured state of a pending edit.
#[derive(Debug, Clone)]
struct PendingEdit<T> {
    previous: T,
}

/// A value with an optional pending optimistic overlay.
///
/// The wrapped value is always the one to render. Rollback restores the
/// entire captured value in one assignment, so compound fields (like flag +
/// like count) revert atomically by construction.
#[derive(Debug, Clone)]
pub struct Optimistic<T: Clone> {
    value: T,
    pending: Option<PendingEdit<T>>,
    status: EditStatus,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            pending: None,
            status: EditStatus::Idle,
        }
    }

    /// The currently rendered value (proposed while pending).
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn status(&self) -> EditStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the value outside of any edit (e.g. a fresh server load).
    ///
    /// Rejected while an edit is pending: reconciliation owns the value
    /// until it settles.
    pub fn reset(&mut self, value: T) -> Result<()> {
        if self.is_pending() {
            return Err(SkilletError::conflict(
                "cannot reset a field while an optimistic edit is pending",
            ));
        }
        self.value = value;
        self.status = EditStatus::Idle;
        Ok(())
    }

    /// Captures the current value and renders `proposed` in its place.
    ///
    /// Errs with `Conflict` if an edit is already pending on this field.
    pub fn begin(&mut self, proposed: T) -> Result<()> {
        if self.is_pending() {
            return Err(SkilletError::conflict(
                "an optimistic edit is already pending on this field",
            ));
        }
        self.pending = Some(PendingEdit {
            previous: self.value.clone(),
        });
        self.value = proposed;
        self.status = EditStatus::Pending;
        Ok(())
    }

    /// Settles the pending edit, keeping the proposed value.
    pub fn confirm(&mut self) -> Result<()> {
        if self.pending.take().is_none() {
            return Err(SkilletError::conflict("no pending edit to confirm"));
        }
        self.status = EditStatus::Confirmed;
        Ok(())
    }

    /// Settles the pending edit, replacing the proposed value with the
    /// server's canonical one.
    pub fn confirm_with(&mut self, canonical: T) -> Result<()> {
        if self.pending.take().is_none() {
            return Err(SkilletError::conflict("no pending edit to confirm"));
        }
        self.value = canonical;
        self.status = EditStatus::Confirmed;
        Ok(())
    }

    /// Restores the captured value exactly.
    pub fn rollback(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(edit) => {
                self.value = edit.previous;
                self.status = EditStatus::RolledBack;
                Ok(())
            }
            None => Err(SkilletError::conflict("no pending edit to roll back")),
        }
    }
}
