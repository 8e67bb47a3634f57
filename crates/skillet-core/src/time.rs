//! Injectable delay abstraction.
//!
//! Retry backoff must be observable in tests without real timers, so the
//! components that sleep take a `Sleeper` instead of calling the runtime
//! directly. The production implementation (tokio) lives in
//! `skillet-client`; tests substitute a recording fake.

use async_trait::async_trait;
use std::time::Duration;

/// Something that can wait out a backoff delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
