//! Retry scheduling for failed requests.
//!
//! The policy is expressed as a pure state machine: `RetryPolicy::next`
//! consumes a state and an event and returns the successor state together
//! with the effect the driver must perform (dispatch, sleep-then-dispatch,
//! or give up). No timers live here, so the exact attempt/delay sequence is
//! testable without a runtime clock.

use std::time::Duration;

/// Lifecycle of a single logical request under retry.
///
/// `Created → Attempting → {Succeeded | Retrying → Attempting |
/// ExhaustedFailed | TerminalFailed}`. `Succeeded`, `ExhaustedFailed` and
/// `TerminalFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// The request has not been dispatched yet.
    Created,
    /// Attempt `attempt` (1-based) is in flight.
    Attempting { attempt: u32 },
    /// A retryable failure occurred; waiting out the backoff before
    /// `next_attempt`.
    Retrying { next_attempt: u32 },
    /// A 2xx response settled the request.
    Succeeded,
    /// Retryable failures exhausted the attempt budget.
    ExhaustedFailed,
    /// A non-retryable failure ended the request on its current attempt.
    TerminalFailed,
}

impl RetryState {
    /// Whether the request has settled (no further attempts will be made).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::ExhaustedFailed | Self::TerminalFailed
        )
    }
}

/// Observed outcome fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEvent {
    /// The driver is ready to dispatch (initial send or after backoff).
    Start,
    /// The attempt returned a success.
    Succeeded,
    /// The attempt failed; `retryable` carries the error classification
    /// verdict.
    Failed { retryable: bool },
}

/// Effect the driver must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEffect {
    /// Send the request; this is attempt `attempt` (1-based).
    Dispatch { attempt: u32 },
    /// Sleep for `delay`, then feed `Start` to dispatch `next_attempt`.
    Backoff { delay: Duration, next_attempt: u32 },
    /// The request settled; surface the result to the caller.
    Settle,
}

/// Retry policy: attempt budget and backoff curve.
///
/// Defaults reproduce the platform contract: 3 attempts total, delay before
/// attempt `n` (n ≥ 2) of `min(1000ms * 2^(n-2), 10s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Computes the backoff delay before the given attempt (2-based).
    ///
    /// Exponential doubling from `base_delay`, capped at `max_delay`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        debug_assert!(attempt >= 2, "no delay before the first attempt");
        // Clamp the exponent: the cap dominates long before 2^32.
        let exponent = attempt.saturating_sub(2).min(20);
        let delay = self.base_delay.saturating_mul(1 << exponent);
        delay.min(self.max_delay)
    }

    /// Advances the state machine.
    ///
    /// Transitions not reachable by a well-behaved driver settle the request
    /// in place rather than panicking.
    pub fn next(&self, state: RetryState, event: RetryEvent) -> (RetryState, RetryEffect) {
        match (state, event) {
            (RetryState::Created, RetryEvent::Start) => (
                RetryState::Attempting { attempt: 1 },
                RetryEffect::Dispatch { attempt: 1 },
            ),
            (RetryState::Retrying { next_attempt }, RetryEvent::Start) => (
                RetryState::Attempting {
                    attempt: next_attempt,
                },
                RetryEffect::Dispatch {
                    attempt: next_attempt,
                },
            ),
            (RetryState::Attempting { .. }, RetryEvent::Succeeded) => {
                (RetryState::Succeeded, RetryEffect::Settle)
            }
            (RetryState::Attempting { .. }, RetryEvent::Failed { retryable: false }) => {
                (RetryState::TerminalFailed, RetryEffect::Settle)
            }
            (RetryState::Attempting { attempt }, RetryEvent::Failed { retryable: true }) => {
                if attempt < self.max_attempts {
                    let next_attempt = attempt + 1;
                    (
                        RetryState::Retrying { next_attempt },
                        RetryEffect::Backoff {
                            delay: self.delay_before(next_attempt),
                            next_attempt,
                        },
                    )
                } else {
                    (RetryState::ExhaustedFailed, RetryEffect::Settle)
                }
            }
            (state, _) => (state, RetryEffect::Settle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_curve() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_before(3), Duration::from_millis(2000));
        assert_eq!(policy.delay_before(4), Duration::from_millis(4000));
        // Capped from attempt 6 onward (16s would exceed the 10s ceiling).
        assert_eq!(policy.delay_before(6), Duration::from_secs(10));
        assert_eq!(policy.delay_before(12), Duration::from_secs(10));
    }

    #[test]
    fn test_transient_failures_exhaust_after_three_attempts() {
        let policy = RetryPolicy::default();
        let mut state = RetryState::Created;
        let mut dispatches = Vec::new();
        let mut delays = Vec::new();

        loop {
            let (next, effect) = policy.next(state, RetryEvent::Start);
            state = next;
            match effect {
                RetryEffect::Dispatch { attempt } => dispatches.push(attempt),
                other => panic!("expected dispatch, got {other:?}"),
            }
            let (next, effect) = policy.next(state, RetryEvent::Failed { retryable: true });
            state = next;
            match effect {
                RetryEffect::Backoff { delay, .. } => delays.push(delay),
                RetryEffect::Settle => break,
                other => panic!("unexpected effect {other:?}"),
            }
        }

        assert_eq!(dispatches, vec![1, 2, 3]);
        assert_eq!(
            delays,
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
        assert_eq!(state, RetryState::ExhaustedFailed);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_terminal_failure_skips_retry() {
        let policy = RetryPolicy::default();
        let (state, _) = policy.next(RetryState::Created, RetryEvent::Start);
        let (state, effect) = policy.next(state, RetryEvent::Failed { retryable: false });
        assert_eq!(state, RetryState::TerminalFailed);
        assert_eq!(effect, RetryEffect::Settle);
    }

    #[test]
    fn test_success_on_second_attempt() {
        let policy = RetryPolicy::default();
        let (state, _) = policy.next(RetryState::Created, RetryEvent::Start);
        let (state, effect) = policy.next(state, RetryEvent::Failed { retryable: true });
        assert!(matches!(effect, RetryEffect::Backoff { next_attempt: 2, .. }));
        let (state, effect) = policy.next(state, RetryEvent::Start);
        assert_eq!(effect, RetryEffect::Dispatch { attempt: 2 });
        let (state, _) = policy.next(state, RetryEvent::Succeeded);
        assert_eq!(state, RetryState::Succeeded);
    }
}
