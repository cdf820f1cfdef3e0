// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for the Meeple sync engine.
//!
//! The remote service's bulk exports are asynchronous and rate-limited, so
//! every fetch runs under the [`RetryPolicy`] executor defined here.

pub mod retry;

pub use retry::{AttemptError, RetryPolicy};
