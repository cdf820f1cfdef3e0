// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted credential and fetcher fakes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use meeple_core::{
    CollectionItem, CollectionSource, CredentialProvider, Play, PlaysSource, SyncError,
};

/// A credential provider with a fixed answer.
pub struct StaticCredentials {
    username: Option<String>,
}

impl StaticCredentials {
    pub fn logged_in(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
        }
    }

    pub fn logged_out() -> Self {
        Self { username: None }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn current_username(&self) -> Option<String> {
        self.username.clone()
    }
}

/// A collection fetcher that pops pre-scripted results in FIFO order.
///
/// An exhausted script yields an empty collection. Invocations are counted
/// so tests can assert a stage was or was not reached.
#[derive(Default)]
pub struct ScriptedCollection {
    responses: Mutex<VecDeque<Result<Vec<CollectionItem>, SyncError>>>,
    calls: AtomicUsize,
}

impl ScriptedCollection {
    pub fn with_responses(
        responses: Vec<Result<Vec<CollectionItem>, SyncError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionSource for ScriptedCollection {
    async fn fetch_collection(
        &self,
        _username: &str,
    ) -> Result<Vec<CollectionItem>, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A plays fetcher that pops pre-scripted results in FIFO order.
#[derive(Default)]
pub struct ScriptedPlays {
    responses: Mutex<VecDeque<Result<Vec<Play>, SyncError>>>,
    calls: AtomicUsize,
}

impl ScriptedPlays {
    pub fn with_responses(responses: Vec<Result<Vec<Play>, SyncError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaysSource for ScriptedPlays {
    async fn fetch_plays(&self, _username: &str) -> Result<Vec<Play>, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_credentials_answer_consistently() {
        let logged_in = StaticCredentials::logged_in("alice");
        assert_eq!(logged_in.current_username().await.as_deref(), Some("alice"));

        let logged_out = StaticCredentials::logged_out();
        assert!(logged_out.current_username().await.is_none());
    }

    #[tokio::test]
    async fn scripted_collection_pops_in_order_and_counts_calls() {
        let fetcher = ScriptedCollection::with_responses(vec![
            Err(SyncError::InvalidUsername),
            Ok(Vec::new()),
        ]);

        assert!(fetcher.fetch_collection("alice").await.is_err());
        assert!(fetcher.fetch_collection("alice").await.is_ok());
        // Exhausted script degrades to an empty collection.
        assert!(fetcher.fetch_collection("alice").await.unwrap().is_empty());
        assert_eq!(fetcher.calls(), 3);
    }
}
