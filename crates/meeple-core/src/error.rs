// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Meeple sync engine.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across the sync engine and its collaborators.
///
/// Transient remote conditions (queued exports, rate limits, 5xx) never
/// surface here directly -- they are retried internally and escalate to
/// [`SyncError::MaxRetriesExceeded`] only once the retry budget is spent.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No authenticated user is available; sync cannot start.
    #[error("not logged in")]
    NotLoggedIn,

    /// The supplied username is blank. Never retried, never hits the network.
    #[error("username is blank")]
    InvalidUsername,

    /// Transport-level I/O failure (connection reset, DNS, timeout).
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered with a status that is neither data nor a
    /// known queuing signal. Indicates a protocol mismatch; not retried.
    #[error("unexpected status {status} from remote service")]
    UnexpectedStatus { status: u16 },

    /// The retry budget for one fetch was exhausted.
    #[error(
        "retries exhausted for {context}: {attempts} attempts, last status {last_status:?}, last delay {last_delay:?}"
    )]
    MaxRetriesExceeded {
        context: String,
        attempts: u32,
        last_status: Option<u16>,
        last_delay: Duration,
    },

    /// The response body could not be parsed as the expected XML document.
    /// Field-level damage degrades to "absent" instead of raising this; only
    /// a stream-level failure aborts a parse.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Local store errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
