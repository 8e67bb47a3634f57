//! The resilient HTTP client core.
//!
//! `ApiClient::send` runs the interceptor pipeline around every request:
//!
//! 1. Request stage, applied per attempt at send time: inject the
//!    `Authorization` header from the live [`SessionStore`] (a token
//!    installed between request construction and dispatch, or between retry
//!    attempts, is observed), pick the timeout (default vs. long-upload for
//!    multipart), and leave multipart content-type to the transport so the
//!    boundary is computed correctly.
//! 2. Response stage: classify the outcome (success / retryable / terminal)
//!    and normalize the user-facing error message from whatever shape the
//!    server body takes; decided once here, never re-sniffed by callers.
//!
//! Transient failures are scheduled through the retry state machine in
//! `skillet-core`; backoff delays run on an injected [`Sleeper`] so tests
//! assert exact timing without a runtime clock.

use crate::request::{ApiRequest, PreparedRequest, RawResponse};
use crate::transport::{ReqwestTransport, TokioSleeper, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use skillet_core::config::ClientConfig;
use skillet_core::error::{GENERIC_ERROR_MESSAGE, Result, SkilletError};
use skillet_core::retry::{RetryEffect, RetryEvent, RetryPolicy, RetryState};
use skillet_core::session::SessionStore;
use skillet_core::time::Sleeper;
use std::sync::Arc;

/// The single configured client the whole application sends through.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    session: SessionStore,
    config: ClientConfig,
    policy: RetryPolicy,
}

impl ApiClient {
    /// Creates a client over the production transport.
    pub fn new(config: ClientConfig, session: SessionStore) -> Self {
        let policy = RetryPolicy {
            max_attempts: config.max_attempts,
            ..RetryPolicy::default()
        };
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            sleeper: Arc::new(TokioSleeper),
            session,
            config,
            policy,
        }
    }

    /// Overrides the transport (scripted transports in tests).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Overrides the backoff sleeper (recording fakes in tests).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request, retrying transient failures per the policy.
    ///
    /// Returns the successful raw response, or the terminal error with its
    /// message already normalized.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut state = RetryState::Created;
        loop {
            let (next, effect) = self.policy.next(state, RetryEvent::Start);
            state = next;
            let attempt = match effect {
                RetryEffect::Dispatch { attempt } => attempt,
                // Start on a terminal state cannot happen from this loop.
                _ => return Err(SkilletError::internal("retry driver out of sync")),
            };

            let prepared = self.prepare(&request);
            let outcome = match self.transport.execute(prepared).await {
                Ok(raw) => classify(raw),
                Err(err) => Err(err),
            };

            match outcome {
                Ok(raw) => {
                    let (next, _) = self.policy.next(state, RetryEvent::Succeeded);
                    debug_assert!(next.is_terminal());
                    return Ok(raw);
                }
                Err(err) => {
                    let event = RetryEvent::Failed {
                        retryable: err.is_retryable(),
                    };
                    let (next, effect) = self.policy.next(state, event);
                    state = next;
                    match effect {
                        RetryEffect::Backoff { delay, next_attempt } => {
                            tracing::debug!(
                                "{} {} attempt {attempt} failed ({err}), retrying (attempt {next_attempt}) in {delay:?}",
                                request.method,
                                request.path,
                            );
                            self.sleeper.sleep(delay).await;
                        }
                        _ => {
                            tracing::warn!(
                                "{} {} failed terminally after attempt {attempt}: {err}",
                                request.method,
                                request.path,
                            );
                            return Err(err);
                        }
                    }
                }
            }
        }
    }

    // ============================================================================
    // Typed convenience wrappers
    // ============================================================================

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        self.send(ApiRequest::post(path).json(body)?).await?.json()
    }

    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        self.send(ApiRequest::put(path).json(body)?).await?.json()
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// The request interceptor stage. Runs once per attempt so the session
    /// token is read at send time, not at construction time.
    fn prepare(&self, request: &ApiRequest) -> PreparedRequest {
        let mut headers = request.headers.clone();
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let timeout = request.timeout.unwrap_or_else(|| {
            if request.is_multipart() {
                self.config.upload_timeout()
            } else {
                self.config.request_timeout()
            }
        });

        PreparedRequest {
            method: request.method.clone(),
            url: format!(
                "{}{}",
                self.config.base_url.trim_end_matches('/'),
                request.path
            ),
            headers,
            payload: request.payload.clone(),
            timeout,
        }
    }
}

/// The response interceptor stage: 2xx passes through, everything else
/// becomes a classified error carrying the normalized server message.
fn classify(raw: RawResponse) -> Result<RawResponse> {
    if raw.is_success() {
        Ok(raw)
    } else {
        Err(SkilletError::from_status(
            raw.status,
            server_message(&raw.body),
        ))
    }
}

/// Extracts a user-facing message from an error body of unknown shape.
///
/// The backend answers with `{"message": ...}`, `{"error": ...}`, a bare
/// JSON string, or plain text depending on the endpoint; this is the single
/// place that ambiguity is resolved.
fn server_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
        if let Some(message) = parsed.error.filter(|m| !m.is_empty()) {
            return message;
        }
    }
    if let Ok(message) = serde_json::from_str::<String>(body) {
        if !message.is_empty() {
            return message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return trimmed.to_string();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}
