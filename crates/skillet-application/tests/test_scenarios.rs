//! End-to-end widget scenarios over a scripted backend.

use async_trait::async_trait;
use skillet_application::{CommentThread, FollowButton, InteractionPanel, UserDirectory};
use skillet_client::api::{CommentsApi, FollowApi, UsersApi};
use skillet_client::request::{PreparedRequest, RawResponse};
use skillet_client::{ApiClient, Transport};
use skillet_core::config::ClientConfig;
use skillet_core::error::{Result, SkilletError};
use skillet_core::model::Comment;
use skillet_core::session::SessionStore;
use skillet_core::time::Sleeper;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted backend keyed by `"METHOD /path"`. Each route holds a queue of
/// outcomes consumed one per call.
#[derive(Default)]
struct FakeBackend {
    routes: Mutex<HashMap<String, VecDeque<Result<RawResponse>>>>,
    log: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn on(&self, method: &str, path: &str, outcome: Result<RawResponse>) {
        self.routes
            .lock()
            .unwrap()
            .entry(format!("{method} {path}"))
            .or_default()
            .push_back(outcome);
    }

    fn on_json(&self, method: &str, path: &str, body: &str) {
        self.on(
            method,
            path,
            Ok(RawResponse {
                status: 200,
                body: body.to_string(),
            }),
        );
    }

    fn calls(&self, method: &str, path: &str) -> usize {
        let key = format!("{method} {path}");
        self.log.lock().unwrap().iter().filter(|k| **k == key).count()
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let path_start = request
            .url
            .find("/api")
            .unwrap_or_else(|| panic!("unexpected url {}", request.url));
        let key = format!("{} {}", request.method, &request.url[path_start..]);
        self.log.lock().unwrap().push(key.clone());
        self.routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted outcome for {key}"))
    }
}

struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            delays: Mutex::new(Vec::new()),
        })
    }

    fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

fn client_over(backend: Arc<FakeBackend>, sleeper: Arc<RecordingSleeper>) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::new(ClientConfig::default(), SessionStore::new())
            .with_transport(backend)
            .with_sleeper(sleeper),
    )
}

fn network_error() -> Result<RawResponse> {
    Err(SkilletError::network("connection refused"))
}

fn script_panel_load(backend: &FakeBackend, item_id: &str, viewer_id: &str, count: u64, liked: bool) {
    backend.on_json(
        "GET",
        &format!("/api/likes/count-by-post/{item_id}"),
        &count.to_string(),
    );
    backend.on_json(
        "GET",
        &format!("/api/likes/by-post/{item_id}/user/{viewer_id}"),
        &liked.to_string(),
    );
    backend.on_json("GET", &format!("/api/comments/{item_id}"), "[]");
}

#[tokio::test]
async fn test_like_rolls_back_exactly_on_terminal_failure() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    script_panel_load(&backend, "42", "A", 5, false);
    backend.on(
        "POST",
        "/api/likes",
        Ok(RawResponse {
            status: 400,
            body: r#"{"error":"Post not found"}"#.to_string(),
        }),
    );

    let mut panel = InteractionPanel::new(client_over(Arc::clone(&backend), sleeper), "42", "A");
    panel.load().await.unwrap();
    assert!(!panel.state().liked);
    assert_eq!(panel.state().like_count, 5);

    let err = panel.toggle_like().await.unwrap_err();
    assert_eq!(err.status(), Some(400));

    // Flag and count reverted together, to exactly the pre-toggle values.
    let state = panel.state();
    assert!(!state.liked);
    assert_eq!(state.like_count, 5);
    assert_eq!(
        panel.take_last_error().as_deref(),
        Some("Request failed (400): Post not found")
    );
}

#[tokio::test]
async fn test_offline_like_reverts_then_succeeds_online() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    script_panel_load(&backend, "42", "A", 5, false);
    // Offline: every attempt fails without a response; the client retries
    // twice before giving up.
    backend.on("POST", "/api/likes", network_error());
    backend.on("POST", "/api/likes", network_error());
    backend.on("POST", "/api/likes", network_error());
    // Back online: the next click succeeds.
    backend.on_json("POST", "/api/likes", r#"{"id":"like-1"}"#);

    let mut panel = InteractionPanel::new(
        client_over(Arc::clone(&backend), Arc::clone(&sleeper)),
        "42",
        "A",
    );
    panel.load().await.unwrap();

    let err = panel.toggle_like().await.unwrap_err();
    assert!(err.is_retryable(), "surfaced error is retry-eligible");
    assert_eq!(backend.calls("POST", "/api/likes"), 3, "no fourth attempt");
    assert_eq!(
        sleeper.recorded(),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
    let state = panel.state();
    assert!(!state.liked);
    assert_eq!(state.like_count, 5);
    assert!(panel.take_last_error().is_some());

    panel.toggle_like().await.unwrap();
    let state = panel.state();
    assert!(state.liked);
    assert_eq!(state.like_count, 6);
    assert!(!panel.is_like_pending());
}

#[tokio::test]
async fn test_comment_order_is_submission_order_despite_response_order() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    let client = client_over(Arc::clone(&backend), sleeper);
    let mut thread = CommentThread::new(CommentsApi::new(client), "42");

    // Two creations staged while both requests are in flight.
    let placeholder_c1 = thread.stage_create("A", Some("ann".into()), "first!").unwrap();
    let placeholder_c2 = thread.stage_create("A", Some("ann".into()), "second").unwrap();

    let server_c1 = Comment {
        id: "c1".to_string(),
        post_id: Some("42".to_string()),
        user_id: "A".to_string(),
        username: Some("ann".to_string()),
        content: "first!".to_string(),
        created_at: Some("2025-05-01T10:00:00Z".to_string()),
    };
    let server_c2 = Comment {
        id: "c2".to_string(),
        content: "second".to_string(),
        ..server_c1.clone()
    };

    // C2's response arrives first.
    thread
        .reconcile_create(&placeholder_c2, Ok(server_c2))
        .unwrap();
    thread
        .reconcile_create(&placeholder_c1, Ok(server_c1))
        .unwrap();

    let ids: Vec<&str> = thread.comments().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"], "submission order preserved");
    assert!(!thread.has_pending());
}

#[tokio::test]
async fn test_failed_comment_placeholder_is_removed() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    backend.on(
        "POST",
        "/api/comments/42",
        Ok(RawResponse {
            status: 400,
            body: r#"{"error":"content is required"}"#.to_string(),
        }),
    );
    let client = client_over(Arc::clone(&backend), sleeper);
    let mut thread = CommentThread::new(CommentsApi::new(client), "42");

    let err = thread.add_comment("A", None, "hello").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(thread.comments().is_empty(), "placeholder rolled back");
    assert!(thread.take_last_error().is_some());
}

#[tokio::test]
async fn test_comment_delete_requires_staged_confirmation_and_rolls_back() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    backend.on_json(
        "GET",
        "/api/comments/42",
        r#"[{"id":"c1","userId":"A","content":"one"},{"id":"c2","userId":"A","content":"two"}]"#,
    );
    backend.on("DELETE", "/api/comments/c1", network_error());
    backend.on("DELETE", "/api/comments/c1", network_error());
    backend.on("DELETE", "/api/comments/c1", network_error());
    let client = client_over(Arc::clone(&backend), sleeper);
    let mut thread = CommentThread::new(CommentsApi::new(client), "42");
    thread.refresh().await.unwrap();

    let ticket = thread.stage_delete("c1").unwrap();
    let err = thread.confirm_delete(ticket).await.unwrap_err();
    assert!(err.is_retryable());

    // Restored at its original position.
    let ids: Vec<&str> = thread.comments().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_follow_toggle_confirm_and_rollback() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    backend.on_json("GET", "/api/follow/check/A/B", r#"{"isFollowing":false}"#);
    backend.on_json("POST", "/api/follow/A/B", "{}");
    backend.on(
        "DELETE",
        "/api/follow/A/B",
        Ok(RawResponse {
            status: 403,
            body: r#"{"message":"not allowed"}"#.to_string(),
        }),
    );
    let client = client_over(Arc::clone(&backend), sleeper);
    let mut button = FollowButton::new(FollowApi::new(client), "A", "B");
    button.load().await.unwrap();
    assert!(!button.is_following());

    button.toggle().await.unwrap();
    assert!(button.is_following());

    let err = button.toggle().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(button.is_following(), "rolled back to following");
    assert_eq!(
        button.take_last_error().as_deref(),
        Some("Request failed (403): not allowed")
    );
}

#[tokio::test]
async fn test_user_fetches_are_deduplicated_per_id() {
    let backend = FakeBackend::new();
    let sleeper = RecordingSleeper::new();
    backend.on_json(
        "GET",
        "/api/users/u7",
        r#"{"id":"u7","username":"chef","fullName":"Chef Seven"}"#,
    );
    let client = client_over(Arc::clone(&backend), sleeper);
    let directory = UserDirectory::new(UsersApi::new(client));

    let (first, second) = tokio::join!(directory.fetch("u7"), directory.fetch("u7"));
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(backend.calls("GET", "/api/users/u7"), 1, "single flight");
    assert_eq!(first, second);
    assert_eq!(directory.cached("u7").unwrap().username, "chef");

    // A later duplicate is a no-op against the cache.
    let third = directory.fetch("u7").await.unwrap();
    assert_eq!(third.username, "chef");
    assert_eq!(backend.calls("GET", "/api/users/u7"), 1);
}
