//! Multi-file upload orchestration.
//!
//! The manager validates a staged batch before any network call, streams the
//! multipart submission with live progress, and retries the *whole* batch on
//! failure with linear backoff. This batch loop is layered above the
//! transport retry in [`ApiClient::send`]: a single submission may itself
//! retry transient failures, and if it still fails the batch is re-submitted.
//! Worst case is therefore bounded at 3 × 3 wire attempts.

use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::transport::TokioSleeper;
use skillet_core::error::{Result, SkilletError};
use skillet_core::model::UploadBatch;
use skillet_core::time::Sleeper;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const UPLOAD_PATH: &str = "/api/upload";

/// Batch-level attempt budget, layered above the per-request retry.
const MAX_BATCH_ATTEMPTS: u32 = 3;

/// Orchestrates multipart submissions with progress and batch retry.
pub struct UploadManager {
    client: Arc<ApiClient>,
    sleeper: Arc<dyn Sleeper>,
    progress_tx: Arc<watch::Sender<u8>>,
    progress_rx: watch::Receiver<u8>,
}

impl UploadManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (progress_tx, progress_rx) = watch::channel(0);
        Self {
            client,
            sleeper: Arc::new(TokioSleeper),
            progress_tx: Arc::new(progress_tx),
            progress_rx,
        }
    }

    /// Overrides the backoff sleeper (tests).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// A receiver of the current upload percentage (0-100).
    ///
    /// Monotonically non-decreasing within an attempt; resets to 0 when a
    /// retry attempt starts.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress_rx.clone()
    }

    /// Submits the batch, returning the uploaded file URLs in order.
    ///
    /// All-or-nothing: on final failure no partial URL set is surfaced, so
    /// a post is never created referencing a half-uploaded batch.
    pub async fn submit(&self, batch: &UploadBatch) -> Result<Vec<String>> {
        batch.validate_for_submit()?;
        let files = Arc::new(batch.files().to_vec());

        let mut attempt = 1u32;
        loop {
            // Progress is per-attempt, not cumulative across attempts.
            let _ = self.progress_tx.send(0);

            let request = ApiRequest::post(UPLOAD_PATH)
                .multipart(Arc::clone(&files), Some(Arc::clone(&self.progress_tx)));

            match self.client.send(request).await {
                Ok(response) => {
                    let urls: Vec<String> = response.json()?;
                    if urls.len() != files.len() {
                        return Err(SkilletError::internal(format!(
                            "upload returned {} URL(s) for {} file(s)",
                            urls.len(),
                            files.len()
                        )));
                    }
                    return Ok(urls);
                }
                Err(err) if attempt < MAX_BATCH_ATTEMPTS => {
                    log::warn!("upload attempt {attempt} failed: {err}, retrying batch");
                    self.sleeper
                        .sleep(Duration::from_millis(1000 * u64::from(attempt)))
                        .await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{PreparedRequest, RawResponse};
    use crate::transport::Transport;
    use async_trait::async_trait;
    use skillet_core::config::ClientConfig;
    use skillet_core::model::{MediaType, StagedFile, UploadBatch};
    use skillet_core::session::SessionStore;
    use std::sync::Mutex;

    struct ScriptedTransport {
        script: Mutex<Vec<Result<RawResponse>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<RawResponse>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, _request: PreparedRequest) -> Result<RawResponse> {
            *self.calls.lock().unwrap() += 1;
            self.script.lock().unwrap().remove(0)
        }
    }

    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                delays: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    fn manager_with(
        transport: Arc<ScriptedTransport>,
        sleeper: Arc<RecordingSleeper>,
    ) -> UploadManager {
        let client = Arc::new(
            ApiClient::new(ClientConfig::default(), SessionStore::new())
                .with_transport(transport)
                .with_sleeper(Arc::clone(&sleeper) as Arc<dyn Sleeper>),
        );
        UploadManager::new(client).with_sleeper(sleeper)
    }

    fn photo_batch(count: usize) -> UploadBatch {
        let mut batch = UploadBatch::new(MediaType::Photo);
        for i in 0..count {
            batch
                .stage(StagedFile::new(format!("p{i}.jpg"), vec![1, 2, 3]))
                .unwrap();
        }
        batch
    }

    fn terminal_failure() -> Result<RawResponse> {
        Ok(RawResponse {
            status: 400,
            body: r#"{"error":"bad request"}"#.to_string(),
        })
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_the_transport() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let manager = manager_with(Arc::clone(&transport), sleeper);

        let err = manager
            .submit(&UploadBatch::new(MediaType::Photo))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_retried_with_linear_backoff() {
        // Terminal per-request failures (400) skip the transport retry, so
        // every wire call here is one batch attempt.
        let transport = Arc::new(ScriptedTransport::new(vec![
            terminal_failure(),
            terminal_failure(),
            terminal_failure(),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let manager = manager_with(Arc::clone(&transport), Arc::clone(&sleeper));

        let err = manager.submit(&photo_batch(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(transport.calls(), 3, "no fourth batch attempt");
        assert_eq!(
            *sleeper.delays.lock().unwrap(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[tokio::test]
    async fn test_batch_recovers_on_second_attempt() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            terminal_failure(),
            Ok(RawResponse {
                status: 200,
                body: r#"["/uploads/p0.jpg","/uploads/p1.jpg"]"#.to_string(),
            }),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let manager = manager_with(Arc::clone(&transport), sleeper);

        let urls = manager.submit(&photo_batch(2)).await.unwrap();
        assert_eq!(urls, vec!["/uploads/p0.jpg", "/uploads/p1.jpg"]);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_partial_url_set_is_an_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(RawResponse {
            status: 200,
            body: r#"["/uploads/p0.jpg"]"#.to_string(),
        })]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let manager = manager_with(Arc::clone(&transport), sleeper);

        let err = manager.submit(&photo_batch(2)).await.unwrap_err();
        assert!(matches!(err, SkilletError::Internal(_)));
        assert_eq!(transport.calls(), 1, "a settled response is not re-submitted");
    }

    #[tokio::test]
    async fn test_progress_resets_at_each_attempt() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            terminal_failure(),
            Ok(RawResponse {
                status: 200,
                body: r#"["/uploads/p0.jpg"]"#.to_string(),
            }),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let manager = manager_with(Arc::clone(&transport), sleeper);

        // Simulate a stale percentage left over from an earlier attempt.
        let _ = manager.progress_tx.send(80);
        manager.submit(&photo_batch(1)).await.unwrap();
        // The scripted transport never streams the body, so the last write
        // is the reset at the start of the final attempt.
        assert_eq!(*manager.progress().borrow(), 0);
    }
}
