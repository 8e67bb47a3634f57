//! Authentication session: model, shared store, persistence trait.

pub mod model;
pub mod repository;
pub mod store;

pub use model::AuthSession;
pub use repository::SessionRepository;
pub use store::SessionStore;
