//! Resilient HTTP client for the Skillet backend.
//!
//! The crate is organized around one [`ApiClient`] (interceptor pipeline +
//! retry engine), a [`Transport`] seam for tests, typed route modules under
//! [`api`], and the [`UploadManager`] for multipart batches.

pub mod api;
pub mod client;
pub mod request;
pub mod transport;
pub mod upload;

pub use client::ApiClient;
pub use request::{ApiRequest, RawResponse};
pub use transport::{ReqwestTransport, TokioSleeper, Transport};
pub use upload::UploadManager;
