// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic exponential-backoff retry executor.
//!
//! Knows nothing about HTTP or XML: callers signal "retry me" versus
//! "fail now" through [`AttemptError`], and the executor owns the backoff
//! schedule, the attempt budget, and the escalation to
//! [`SyncError::MaxRetriesExceeded`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use meeple_core::SyncError;

/// Upper bound of the random jitter added to every backoff wait.
const JITTER_MS: u64 = 500;

/// Outcome of a single attempt, as reported by the operation under retry.
///
/// A retry signal is control flow, not a failure: it carries the observed
/// status (when there is one) and nothing else. Anything terminal travels
/// as [`AttemptError::Fatal`] and propagates immediately without another
/// attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// The attempt hit a transient condition; run another attempt after
    /// backing off.
    Retry { status: Option<u16> },
    /// Terminal failure; never retried.
    Fatal(SyncError),
}

/// Backoff schedule and attempt budget for one retried operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(15000),
            multiplier: 1.4,
        }
    }
}

impl RetryPolicy {
    /// Runs `op` up to `max_attempts` times, sleeping between attempts.
    ///
    /// `op` receives the 1-based attempt number. The wait before attempt
    /// N+1 is `min(max_delay, delay * multiplier + random(0..500ms))`, and
    /// that clamped value becomes the delay carried into the next round, so
    /// successive waits are non-decreasing until they hit `max_delay`.
    ///
    /// The sleep is an ordinary `tokio::time::sleep`: cancelling the
    /// surrounding task during a wait unwinds without invoking another
    /// attempt and without surfacing `MaxRetriesExceeded`.
    ///
    /// `context` identifies the operation in logs and in the exhaustion
    /// error (typically the username being synced).
    pub async fn run<T, F, Fut>(&self, context: &str, mut op: F) -> Result<T, SyncError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let mut delay = self.initial_delay;
        let mut last_status = None;

        for attempt in 1..=self.max_attempts {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Retry { status }) => {
                    last_status = status;
                    if attempt == self.max_attempts {
                        break;
                    }
                    let jitter =
                        Duration::from_millis(rand::thread_rng().gen_range(0..JITTER_MS));
                    delay = (delay.mul_f64(self.multiplier) + jitter).min(self.max_delay);
                    debug!(
                        context,
                        attempt,
                        status = ?status,
                        delay_ms = delay.as_millis() as u64,
                        "transient response, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(SyncError::MaxRetriesExceeded {
            context: context.to_string(),
            attempts: self.max_attempts,
            last_status,
            last_delay: delay,
        })
    }
}
