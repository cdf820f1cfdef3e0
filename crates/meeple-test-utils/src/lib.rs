// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic fakes for sync-engine tests.
//!
//! Everything here implements the collaborator traits from `meeple-core`
//! without network or disk, so orchestration tests run fast and CI-clean.

pub mod fakes;
pub mod memory_store;

pub use fakes::{ScriptedCollection, ScriptedPlays, StaticCredentials};
pub use memory_store::MemoryStore;
