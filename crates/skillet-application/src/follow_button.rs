//! Optimistic follow/unfollow toggle.

use skillet_client::api::FollowApi;
use skillet_core::error::Result;
use skillet_core::optimistic::Optimistic;

/// Follow state of one viewer/target pair.
///
/// Same optimistic shape as the like toggle: flip immediately, confirm on
/// 2xx, restore exactly on terminal failure. A second toggle while one is
/// pending is rejected (button disabled).
pub struct FollowButton {
    api: FollowApi,
    viewer_id: String,
    target_id: String,
    following: Optimistic<bool>,
    last_error: Option<String>,
}

impl FollowButton {
    pub fn new(api: FollowApi, viewer_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            api,
            viewer_id: viewer_id.into(),
            target_id: target_id.into(),
            following: Optimistic::new(false),
            last_error: None,
        }
    }

    /// Fetches the current follow status.
    pub async fn load(&mut self) -> Result<()> {
        let following = self.api.check(&self.viewer_id, &self.target_id).await?;
        self.following.reset(following)
    }

    pub fn is_following(&self) -> bool {
        *self.following.value()
    }

    pub fn is_pending(&self) -> bool {
        self.following.is_pending()
    }

    /// The last surfaced failure, cleared on read.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Toggles follow state optimistically.
    pub async fn toggle(&mut self) -> Result<()> {
        let currently_following = *self.following.value();
        self.following.begin(!currently_following)?;

        let outcome = if currently_following {
            self.api.unfollow(&self.viewer_id, &self.target_id).await
        } else {
            self.api.follow(&self.viewer_id, &self.target_id).await
        };

        match outcome {
            Ok(()) => {
                self.following.confirm()?;
                Ok(())
            }
            Err(err) => {
                self.following.rollback()?;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
