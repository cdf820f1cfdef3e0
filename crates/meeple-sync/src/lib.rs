// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync engine orchestration for the Meeple board-game tracker.

pub mod orchestrator;

pub use orchestrator::{SyncFailed, SyncOrchestrator, SyncReport};
