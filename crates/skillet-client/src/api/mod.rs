//! Typed wrappers over the backend REST surface.
//!
//! One module per controller; each wraps the shared [`ApiClient`] and keeps
//! its wire DTOs private.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod auth;
pub mod comments;
pub mod follow;
pub mod likes;
pub mod notifications;
pub mod plans;
pub mod posts;
pub mod progress;
pub mod users;

pub use auth::{AuthApi, AuthExchange, ProfileUpdate, Registration};
pub use comments::CommentsApi;
pub use follow::FollowApi;
pub use likes::LikesApi;
pub use notifications::NotificationsApi;
pub use plans::PlansApi;
pub use posts::{NewPost, PostsApi, PostUpdate};
pub use progress::ProgressApi;
pub use users::UsersApi;
