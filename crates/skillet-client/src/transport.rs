//! Transport seam and the reqwest implementation.
//!
//! The client core talks to an object-safe [`Transport`] so tests can
//! script responses without a server. [`ReqwestTransport`] is the
//! production implementation; it owns the multipart encoding (reqwest
//! computes the boundary, so no fixed `Content-Type` header is ever set for
//! file batches) and streams upload bodies through a byte counter that
//! feeds the progress channel.

use crate::request::{Payload, PreparedRequest, RawResponse};
use async_trait::async_trait;
use futures::Stream;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use skillet_core::error::{Result, SkilletError};
use skillet_core::time::Sleeper;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Executes one prepared request and returns the raw status + body.
///
/// Implementations classify *connection-level* failures (no response,
/// timeout) via [`SkilletError`]; status-level classification belongs to
/// the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(&value),
            Payload::Multipart(multipart) => {
                let total = multipart.total_bytes();
                let sent = Arc::new(AtomicU64::new(0));
                let mut form = Form::new();
                for file in multipart.files.iter() {
                    let stream = progress_stream(
                        file.bytes.clone(),
                        Arc::clone(&sent),
                        total,
                        multipart.progress.clone(),
                    );
                    let part = Part::stream_with_length(Body::wrap_stream(stream), file.size())
                        .file_name(file.name.clone())
                        .mime_str(&file.mime)
                        .map_err(|err| {
                            SkilletError::validation(format!(
                                "invalid mime type '{}': {err}",
                                file.mime
                            ))
                        })?;
                    form = form.part("files", part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Chunks file bytes into a stream that reports cumulative progress as the
/// transport pulls them onto the wire.
///
/// The percentage is derived from bytes handed over vs. the batch total, so
/// it is monotonically non-decreasing within one attempt.
fn progress_stream(
    bytes: Vec<u8>,
    sent: Arc<AtomicU64>,
    total: u64,
    progress: Option<Arc<watch::Sender<u8>>>,
) -> impl Stream<Item = std::io::Result<Vec<u8>>> + Send {
    let chunks: Vec<Vec<u8>> = bytes
        .chunks(UPLOAD_CHUNK_BYTES)
        .map(<[u8]>::to_vec)
        .collect();
    futures::stream::iter(chunks.into_iter().map(move |chunk| {
        let handed = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
        if let Some(tx) = &progress {
            let percent = if total == 0 {
                100
            } else {
                (handed.saturating_mul(100) / total).min(100) as u8
            };
            let _ = tx.send(percent);
        }
        Ok(chunk)
    }))
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_progress_is_monotonic_and_reaches_100() {
        let (tx, rx) = watch::channel(0u8);
        let bytes = vec![7u8; UPLOAD_CHUNK_BYTES * 3 + 10];
        let total = bytes.len() as u64;
        let mut stream = Box::pin(progress_stream(
            bytes.clone(),
            Arc::new(AtomicU64::new(0)),
            total,
            Some(Arc::new(tx)),
        ));

        let mut last_percent = 0u8;
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            collected.extend_from_slice(&chunk);
            let percent = *rx.borrow();
            assert!(percent >= last_percent, "progress went backwards");
            last_percent = percent;
        }

        assert_eq!(collected, bytes);
        assert_eq!(*rx.borrow(), 100);
    }

    #[tokio::test]
    async fn test_progress_splits_across_files() {
        // Two files sharing one counter: the second file's stream continues
        // from where the first left off.
        let (tx, rx) = watch::channel(0u8);
        let tx = Arc::new(tx);
        let sent = Arc::new(AtomicU64::new(0));
        let first = vec![0u8; 100];
        let second = vec![1u8; 100];

        let mut stream =
            Box::pin(progress_stream(first, Arc::clone(&sent), 200, Some(Arc::clone(&tx))));
        while stream.next().await.is_some() {}
        assert_eq!(*rx.borrow(), 50);

        let mut stream = Box::pin(progress_stream(second, sent, 200, Some(tx)));
        while stream.next().await.is_some() {}
        assert_eq!(*rx.borrow(), 100);
    }
}
