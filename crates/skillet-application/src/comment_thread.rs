//! Optimistic comment thread.
//!
//! Creation follows the apply/reconcile split from the shared optimistic
//! pattern, but each pending comment is its own entity keyed by a
//! client-generated uuid rather than one edit on the whole list. That keeps
//! the one-pending-edit-per-field rule intact while allowing several
//! creations in flight, and it makes display order submission order no
//! matter when the server responses arrive: the placeholder holds the slot,
//! reconciliation replaces it in place by id.

use crate::confirm::DeleteTicket;
use skillet_client::api::CommentsApi;
use skillet_core::error::{Result, SkilletError};
use skillet_core::model::Comment;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// The comment list of one post, with optimistic create/edit/delete.
pub struct CommentThread {
    api: CommentsApi,
    post_id: String,
    comments: Vec<Comment>,
    /// Placeholder ids awaiting reconciliation with a server comment.
    pending_creates: HashSet<String>,
    /// Previous content of comments with an edit in flight.
    pending_edits: HashMap<String, String>,
    last_error: Option<String>,
}

impl CommentThread {
    pub fn new(api: CommentsApi, post_id: impl Into<String>) -> Self {
        Self {
            api,
            post_id: post_id.into(),
            comments: Vec::new(),
            pending_creates: HashSet::new(),
            pending_edits: HashMap::new(),
            last_error: None,
        }
    }

    /// The rendered comment sequence, placeholders included.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_creates.is_empty() || !self.pending_edits.is_empty()
    }

    /// The last surfaced failure, cleared on read.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Replaces the list with a fresh server load.
    ///
    /// Rejected while any mutation is pending: reconciliation owns those
    /// slots until they settle.
    pub fn reset(&mut self, comments: Vec<Comment>) -> Result<()> {
        if self.has_pending() {
            return Err(SkilletError::conflict(
                "cannot reload comments while a mutation is pending",
            ));
        }
        self.comments = comments;
        Ok(())
    }

    /// Fetches the thread from the server without touching local state
    /// (callers pass the result to [`reset`], possibly after joining other
    /// loads).
    ///
    /// [`reset`]: Self::reset
    pub async fn fetch(&self) -> Result<Vec<Comment>> {
        self.api.list(&self.post_id).await
    }

    /// Fetches the thread from the server and replaces the local list.
    pub async fn refresh(&mut self) -> Result<()> {
        let comments = self.api.list(&self.post_id).await?;
        self.reset(comments)
    }

    // ============================================================================
    // Create
    // ============================================================================

    /// Applies a placeholder comment locally and returns its client id.
    ///
    /// The placeholder occupies the comment's final display slot; it is
    /// replaced in place (or removed) by [`reconcile_create`].
    ///
    /// [`reconcile_create`]: Self::reconcile_create
    pub fn stage_create(
        &mut self,
        user_id: &str,
        username: Option<String>,
        content: &str,
    ) -> Result<String> {
        if content.trim().is_empty() {
            return Err(SkilletError::validation("comment cannot be empty"));
        }
        let placeholder_id = format!("pending-{}", Uuid::new_v4());
        self.comments.push(Comment {
            id: placeholder_id.clone(),
            post_id: Some(self.post_id.clone()),
            user_id: user_id.to_string(),
            username,
            content: content.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        });
        self.pending_creates.insert(placeholder_id.clone());
        Ok(placeholder_id)
    }

    /// Settles a staged creation with the request outcome.
    ///
    /// Success replaces the placeholder in place with the server's
    /// canonical comment (id, timestamp); failure removes the placeholder
    /// and surfaces the error.
    pub fn reconcile_create(
        &mut self,
        placeholder_id: &str,
        outcome: Result<Comment>,
    ) -> Result<()> {
        if !self.pending_creates.remove(placeholder_id) {
            return Err(SkilletError::conflict("unknown pending comment"));
        }
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == placeholder_id);
        match outcome {
            Ok(canonical) => {
                if let Some(index) = index {
                    self.comments[index] = canonical;
                }
                Ok(())
            }
            Err(err) => {
                if let Some(index) = index {
                    self.comments.remove(index);
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Stages, dispatches and reconciles one comment creation.
    pub async fn add_comment(
        &mut self,
        user_id: &str,
        username: Option<String>,
        content: &str,
    ) -> Result<()> {
        let placeholder_id = self.stage_create(user_id, username, content)?;
        let outcome = self.api.create(&self.post_id, user_id, content).await;
        self.reconcile_create(&placeholder_id, outcome)
    }

    // ============================================================================
    // Edit
    // ============================================================================

    /// Optimistically rewrites a comment's content, rolling back on failure.
    pub async fn edit_comment(&mut self, comment_id: &str, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(SkilletError::validation("comment cannot be empty"));
        }
        if self.pending_creates.contains(comment_id) {
            return Err(SkilletError::conflict(
                "comment is still being created",
            ));
        }
        if self.pending_edits.contains_key(comment_id) {
            return Err(SkilletError::conflict("an edit is already pending"));
        }
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or_else(|| SkilletError::validation("unknown comment"))?;

        let previous = std::mem::replace(&mut self.comments[index].content, content.to_string());
        self.pending_edits
            .insert(comment_id.to_string(), previous.clone());

        match self.api.update(comment_id, content).await {
            Ok(canonical) => {
                self.pending_edits.remove(comment_id);
                if let Some(comment) = self
                    .comments
                    .iter_mut()
                    .find(|comment| comment.id == comment_id)
                {
                    comment.content = canonical.content;
                }
                Ok(())
            }
            Err(err) => {
                self.pending_edits.remove(comment_id);
                if let Some(comment) = self
                    .comments
                    .iter_mut()
                    .find(|comment| comment.id == comment_id)
                {
                    comment.content = previous;
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // ============================================================================
    // Delete
    // ============================================================================

    /// Stages a deletion for user confirmation. Nothing is dispatched and
    /// nothing changes locally until the ticket is confirmed.
    pub fn stage_delete(&self, comment_id: &str) -> Result<DeleteTicket> {
        if self.pending_creates.contains(comment_id) {
            return Err(SkilletError::conflict(
                "comment is still being created",
            ));
        }
        if !self.comments.iter().any(|comment| comment.id == comment_id) {
            return Err(SkilletError::validation("unknown comment"));
        }
        Ok(DeleteTicket::new(comment_id))
    }

    /// Performs a confirmed deletion: optimistic removal, restored at its
    /// original position when the request fails.
    pub async fn confirm_delete(&mut self, ticket: DeleteTicket) -> Result<()> {
        let comment_id = ticket.target_id().to_string();
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or_else(|| SkilletError::validation("unknown comment"))?;
        let removed = self.comments.remove(index);

        match self.api.delete(&comment_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let index = index.min(self.comments.len());
                self.comments.insert(index, removed);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
