//! Domain models shared across the client.

pub mod comment;
pub mod interaction;
pub mod learning;
pub mod notification;
pub mod post;
pub mod upload;
pub mod user;

pub use comment::Comment;
pub use interaction::{InteractionState, LikeState};
pub use learning::{LearningPlan, LearningProgress, TimelineStep};
pub use notification::{Notification, NotificationKind, NotificationPost};
pub use post::Post;
pub use upload::{MediaType, StagedFile, UploadBatch};
pub use user::{UserAccount, UserSummary};
