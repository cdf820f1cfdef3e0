// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Meeple board-game tracker.
//!
//! This crate provides the domain records mirrored from the remote
//! game-cataloging service, the error taxonomy shared by the whole sync
//! engine, and the collaborator traits (credentials, local store, fetchers)
//! that the orchestrator consumes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SyncError;
pub use types::{CollectionItem, Play, Player, Subtype, SyncTimestamps};

pub use traits::{CollectionSource, CredentialProvider, LocalStore, PlaysSource};
