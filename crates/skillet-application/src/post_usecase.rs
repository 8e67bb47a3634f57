//! Post composition and catalog management.

use crate::confirm::DeleteTicket;
use skillet_client::api::{NewPost, PostUpdate, PostsApi};
use skillet_client::{ApiClient, UploadManager};
use skillet_core::error::{Result, SkilletError};
use skillet_core::model::{MediaType, Post, StagedFile, UploadBatch};
use skillet_core::session::SessionStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Builds a post: staged media, title/description, upload-then-create.
///
/// Publishing is all-or-nothing: the post is only created once the upload
/// manager has returned the complete URL set, never from a partial batch.
pub struct PostComposer {
    posts: PostsApi,
    uploader: UploadManager,
    session: SessionStore,
    title: String,
    description: String,
    batch: UploadBatch,
}

impl PostComposer {
    pub fn new(client: Arc<ApiClient>, session: SessionStore) -> Self {
        Self {
            posts: PostsApi::new(Arc::clone(&client)),
            uploader: UploadManager::new(client),
            session,
            title: String::new(),
            description: String::new(),
            batch: UploadBatch::new(MediaType::Photo),
        }
    }

    /// Overrides the upload manager (tests inject a scripted one).
    pub fn with_uploader(mut self, uploader: UploadManager) -> Self {
        self.uploader = uploader;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Switches the media kind; switching clears staged files.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.batch.set_media_type(media_type);
    }

    /// Stages one file, enforcing the per-file and count caps.
    pub fn stage_file(&mut self, file: StagedFile) -> Result<()> {
        self.batch.stage(file)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<StagedFile> {
        self.batch.remove(index)
    }

    pub fn batch(&self) -> &UploadBatch {
        &self.batch
    }

    /// Live upload percentage for the progress bar.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.uploader.progress()
    }

    /// Validates, uploads the batch and creates the post.
    ///
    /// The form resets only on success; on failure everything staged is
    /// kept so the user can retry.
    pub async fn publish(&mut self) -> Result<Post> {
        let user_id = self
            .session
            .user_id()
            .ok_or_else(|| SkilletError::session("not signed in"))?;
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(SkilletError::validation(
                "please fill in all required fields",
            ));
        }

        let media_urls = self.uploader.submit(&self.batch).await?;
        let post = self
            .posts
            .create(&NewPost {
                user_id,
                title: self.title.clone(),
                description: self.description.clone(),
                media_urls,
                media_type: self.batch.media_type(),
            })
            .await?;

        self.title.clear();
        self.description.clear();
        self.batch.clear();
        Ok(post)
    }
}

/// A loaded list of posts with edit and confirmed-delete flows.
pub struct PostCatalog {
    api: PostsApi,
    posts: Vec<Post>,
    last_error: Option<String>,
}

impl PostCatalog {
    pub fn new(api: PostsApi) -> Self {
        Self {
            api,
            posts: Vec::new(),
            last_error: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The last surfaced failure, cleared on read.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Loads the global feed.
    pub async fn refresh(&mut self) -> Result<()> {
        self.posts = self.api.list().await?;
        Ok(())
    }

    /// Loads one user's posts.
    pub async fn refresh_for_user(&mut self, user_id: &str) -> Result<()> {
        self.posts = self.api.by_user(user_id).await?;
        Ok(())
    }

    /// Updates a post's editable fields, replacing the list entry with the
    /// server's canonical version.
    pub async fn edit(&mut self, post_id: &str, update: &PostUpdate) -> Result<Post> {
        let updated = self.api.update(post_id, update).await?;
        if let Some(entry) = self.posts.iter_mut().find(|post| post.id == updated.id) {
            *entry = updated.clone();
        }
        Ok(updated)
    }

    /// Stages a deletion for user confirmation.
    pub fn stage_delete(&self, post_id: &str) -> Result<DeleteTicket> {
        if !self.posts.iter().any(|post| post.id == post_id) {
            return Err(SkilletError::validation("unknown post"));
        }
        Ok(DeleteTicket::new(post_id))
    }

    /// Performs a confirmed deletion: removed from the list immediately,
    /// restored at its original position if the request fails.
    pub async fn confirm_delete(&mut self, ticket: DeleteTicket) -> Result<()> {
        let post_id = ticket.target_id().to_string();
        let index = self
            .posts
            .iter()
            .position(|post| post.id == post_id)
            .ok_or_else(|| SkilletError::validation("unknown post"))?;
        let removed = self.posts.remove(index);

        match self.api.delete(&post_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let index = index.min(self.posts.len());
                self.posts.insert(index, removed);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
