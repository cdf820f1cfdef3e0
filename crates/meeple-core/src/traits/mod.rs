// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the sync engine.
//!
//! The orchestrator only ever sees these seams, so tests can substitute
//! deterministic fakes for credentials, storage, and the remote fetchers.

pub mod credentials;
pub mod source;
pub mod store;

pub use credentials::CredentialProvider;
pub use source::{CollectionSource, PlaysSource};
pub use store::LocalStore;
