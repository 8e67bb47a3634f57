//! Request and response types exchanged with the transport.

use serde::Serialize;
use serde::de::DeserializeOwned;
use skillet_core::error::Result;
use skillet_core::model::StagedFile;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub use reqwest::Method;

/// Request body variants.
///
/// Multipart payloads share their file data behind an `Arc` so a retry
/// attempt can rebuild the wire body without copying megabytes of file
/// bytes.
#[derive(Clone)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartPayload),
}

/// A multipart file batch plus an optional progress sink.
#[derive(Clone)]
pub struct MultipartPayload {
    pub files: Arc<Vec<StagedFile>>,
    /// Percent (0-100) of bytes handed to the wire, updated as the body
    /// streams out.
    pub progress: Option<Arc<watch::Sender<u8>>>,
}

impl MultipartPayload {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(StagedFile::size).sum()
    }
}

/// A request as callers describe it: method, API path, body, and per-call
/// overrides. Auth headers and timeouts are injected later, at send time.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
    /// Per-call timeout override; `None` selects the configured default
    /// (or the upload timeout for multipart payloads).
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: Payload::Empty,
            timeout: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attaches a multipart file batch.
    pub fn multipart(
        mut self,
        files: Arc<Vec<StagedFile>>,
        progress: Option<Arc<watch::Sender<u8>>>,
    ) -> Self {
        self.payload = Payload::Multipart(MultipartPayload { files, progress });
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.payload, Payload::Multipart(_))
    }
}

/// A request after the send-time interceptor stage: URL resolved, auth
/// header injected, timeout decided. This is what the transport executes.
#[derive(Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    pub timeout: Duration,
}

/// The raw outcome of a transport round trip: status plus body text.
///
/// Status classification and body decoding happen in the client, not the
/// transport, so scripted test transports stay trivial.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
