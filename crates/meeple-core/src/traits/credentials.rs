// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential provider trait.

use async_trait::async_trait;

/// Supplies the currently authenticated remote-service username.
///
/// Session establishment and secret storage live outside the sync engine;
/// this trait only answers "who is syncing right now".
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current username, or `None` when nobody is logged in.
    async fn current_username(&self) -> Option<String>;
}
