//! The like/comment bar of one content item.

use crate::comment_thread::CommentThread;
use skillet_client::ApiClient;
use skillet_client::api::{CommentsApi, LikesApi};
use skillet_core::error::Result;
use skillet_core::model::{InteractionState, LikeState};
use skillet_core::optimistic::Optimistic;
use std::sync::Arc;

/// Per-item, per-viewer interaction coordinator: the optimistic like toggle
/// and the comment thread.
///
/// Created lazily when an item scrolls into view and dropped with it; all
/// state here is rebuilt from the server on [`load`].
///
/// [`load`]: Self::load
pub struct InteractionPanel {
    likes: LikesApi,
    item_id: String,
    viewer_id: String,
    like: Optimistic<LikeState>,
    thread: CommentThread,
    last_error: Option<String>,
}

impl InteractionPanel {
    pub fn new(
        client: Arc<ApiClient>,
        item_id: impl Into<String>,
        viewer_id: impl Into<String>,
    ) -> Self {
        let item_id = item_id.into();
        Self {
            likes: LikesApi::new(Arc::clone(&client)),
            thread: CommentThread::new(CommentsApi::new(client), item_id.clone()),
            item_id,
            viewer_id: viewer_id.into(),
            like: Optimistic::new(LikeState::default()),
            last_error: None,
        }
    }

    /// Fetches like count, the viewer's like flag and the comment thread in
    /// one joined round of requests.
    pub async fn load(&mut self) -> Result<()> {
        let (like_count, liked, comments) = futures::join!(
            self.likes.count_by_post(&self.item_id),
            self.likes.has_liked(&self.item_id, &self.viewer_id),
            self.thread.fetch(),
        );
        self.like.reset(LikeState {
            liked: liked?,
            like_count: like_count?,
        })?;
        self.thread.reset(comments?)?;
        Ok(())
    }

    /// Snapshot for rendering.
    pub fn state(&self) -> InteractionState {
        let like = self.like.value();
        InteractionState {
            item_id: self.item_id.clone(),
            liked: like.liked,
            like_count: like.like_count,
            comments: self.thread.comments().to_vec(),
            comment_count: self.thread.comment_count(),
        }
    }

    /// Whether the like button should render disabled.
    pub fn is_like_pending(&self) -> bool {
        self.like.is_pending()
    }

    /// The last surfaced failure, cleared on read (the UI shows it as a
    /// transient, auto-dismissing message).
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Toggles the like flag optimistically.
    ///
    /// The flipped flag and adjusted count render before the request is
    /// dispatched; a terminal failure restores both exactly and surfaces a
    /// transient error. A second toggle while one is pending is rejected
    /// with `Conflict` (the button is disabled meanwhile).
    pub async fn toggle_like(&mut self) -> Result<()> {
        let current = *self.like.value();
        self.like.begin(current.toggled())?;

        let outcome = if current.liked {
            self.likes.unlike(&self.item_id, &self.viewer_id).await
        } else {
            self.likes.like(&self.item_id, &self.viewer_id).await
        };

        match outcome {
            Ok(()) => {
                self.like.confirm()?;
                Ok(())
            }
            Err(err) => {
                self.like.rollback()?;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// The comment thread, for create/edit/delete flows.
    pub fn thread(&mut self) -> &mut CommentThread {
        &mut self.thread
    }
}
