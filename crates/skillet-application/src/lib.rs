//! Application-layer coordinators for the Skillet client.
//!
//! Each module owns one interactive widget's state: the optimistic
//! apply/confirm/rollback flow is shared via `skillet_core::optimistic`,
//! requests go through the resilient `skillet_client::ApiClient`, and
//! destructive operations pass the [`confirm::DeleteTicket`] gate.

pub mod auth;
pub mod comment_thread;
pub mod confirm;
pub mod follow_button;
pub mod interaction_panel;
pub mod learning_usecase;
pub mod notification_feed;
pub mod post_usecase;
pub mod user_directory;

pub use auth::AuthService;
pub use comment_thread::CommentThread;
pub use confirm::DeleteTicket;
pub use follow_button::FollowButton;
pub use interaction_panel::InteractionPanel;
pub use learning_usecase::{LearningPlanService, LearningProgressService};
pub use notification_feed::NotificationFeed;
pub use post_usecase::{PostCatalog, PostComposer};
pub use user_directory::UserDirectory;
