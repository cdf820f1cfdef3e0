// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection fetcher.
//!
//! The remote service exports a collection in two subtype-homogeneous
//! slices: base games, then expansions. Both run against the same endpoint,
//! separated by a mandatory delay because the service throttles rapid
//! requests for the same account, and each slice runs under the retry
//! executor until the queued export materializes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use meeple_core::{CollectionItem, CollectionSource, Subtype, SyncError};
use meeple_resilience::{AttemptError, RetryPolicy};

use crate::client::{RemoteClient, body_reader, is_transient};
use crate::parse;

/// Default pause between the base-game and expansion sub-fetches.
const DEFAULT_SUBFETCH_GAP: Duration = Duration::from_millis(5000);

/// Fetches a user's full collection: base games first, then expansions.
pub struct CollectionFetcher {
    client: RemoteClient,
    retry: RetryPolicy,
    subfetch_gap: Duration,
}

impl CollectionFetcher {
    pub fn new(client: RemoteClient, retry: RetryPolicy) -> Self {
        Self {
            client,
            retry,
            subfetch_gap: DEFAULT_SUBFETCH_GAP,
        }
    }

    /// Overrides the pause between the two sub-fetches.
    pub fn with_subfetch_gap(mut self, gap: Duration) -> Self {
        self.subfetch_gap = gap;
        self
    }

    /// Fetches the complete collection for `username`.
    ///
    /// Ordering: base games in remote order, then expansions in remote
    /// order. No cross-sorting happens here; display ordering is the
    /// presentation layer's concern.
    pub async fn fetch(&self, username: &str) -> Result<Vec<CollectionItem>, SyncError> {
        if username.trim().is_empty() {
            return Err(SyncError::InvalidUsername);
        }

        let mut items = self.fetch_subtype(username, Subtype::BaseGame).await?;
        debug!(
            username,
            base_games = items.len(),
            gap_ms = self.subfetch_gap.as_millis() as u64,
            "base games fetched, pausing before expansions"
        );
        tokio::time::sleep(self.subfetch_gap).await;

        let expansions = self.fetch_subtype(username, Subtype::Expansion).await?;
        debug!(username, expansions = expansions.len(), "expansions fetched");
        items.extend(expansions);
        Ok(items)
    }

    async fn fetch_subtype(
        &self,
        username: &str,
        subtype: Subtype,
    ) -> Result<Vec<CollectionItem>, SyncError> {
        self.retry
            .run(username, |attempt| self.attempt(username, subtype, attempt))
            .await
    }

    /// One attempt: request, classify the status, stream-parse on 200, and
    /// treat a disguised-empty body as still-queued.
    async fn attempt(
        &self,
        username: &str,
        subtype: Subtype,
        attempt: u32,
    ) -> Result<Vec<CollectionItem>, AttemptError> {
        let response = self
            .client
            .get_collection(username, subtype)
            .await
            .map_err(AttemptError::Fatal)?;

        let status = response.status();
        debug!(username, ?subtype, attempt, status = %status, "collection response received");

        if is_transient(status) {
            return Err(AttemptError::Retry {
                status: Some(status.as_u16()),
            });
        }
        if status != StatusCode::OK {
            return Err(AttemptError::Fatal(SyncError::UnexpectedStatus {
                status: status.as_u16(),
            }));
        }

        let parsed = parse::collection::parse(body_reader(response), Some(subtype))
            .await
            .map_err(AttemptError::Fatal)?;

        if parsed.looks_queued() {
            debug!(username, ?subtype, attempt, "200 with disguised-empty body, still queued");
            return Err(AttemptError::Retry { status: Some(200) });
        }

        Ok(parsed.items)
    }
}

#[async_trait]
impl CollectionSource for CollectionFetcher {
    async fn fetch_collection(&self, username: &str) -> Result<Vec<CollectionItem>, SyncError> {
        self.fetch(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            multiplier: 1.4,
        }
    }

    fn fetcher(server: &MockServer, max_attempts: u32) -> CollectionFetcher {
        CollectionFetcher::new(
            RemoteClient::new(server.uri()).unwrap(),
            fast_retry(max_attempts),
        )
        .with_subfetch_gap(Duration::ZERO)
    }

    const BASE_BODY: &str = r#"
        <items totalitems="1">
          <item objectid="13" subtype="boardgame"><name>Catan</name></item>
        </items>"#;

    const EXPANSION_BODY: &str = r#"
        <items totalitems="1">
          <item objectid="200" subtype="boardgameexpansion"><name>Seafarers</name></item>
        </items>"#;

    const DISGUISED_EMPTY: &str =
        r#"<items totalitems="0" termsofuse="https://example.com"></items>"#;

    #[tokio::test]
    async fn queued_then_ready_collection_needs_one_backoff() {
        let server = MockServer::start().await;

        // Base-game request: 202 (queued) once, then the data.
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("username", "alice"))
            .and(query_param("excludesubtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(202))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("username", "alice"))
            .and(query_param("excludesubtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BASE_BODY))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("username", "alice"))
            .and(query_param("subtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EXPANSION_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let items = fetcher(&server, 5).fetch("alice").await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].game_id, 13);
        assert_eq!(items[0].name, "Catan");
        assert_eq!(items[0].subtype, Subtype::BaseGame);
        assert_eq!(items[1].game_id, 200);
        assert_eq!(items[1].name, "Seafarers");
        assert_eq!(items[1].subtype, Subtype::Expansion);
    }

    #[tokio::test]
    async fn disguised_empty_is_retried_not_returned() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("excludesubtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DISGUISED_EMPTY))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("excludesubtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BASE_BODY))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("subtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EXPANSION_BODY))
            .mount(&server)
            .await;

        let items = fetcher(&server, 5).fetch("alice").await.unwrap();
        // The disguised-empty 200 must not surface as an empty collection.
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn persistent_disguised_empty_exhausts_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DISGUISED_EMPTY))
            .expect(2)
            .mount(&server)
            .await;

        let err = fetcher(&server, 2).fetch("alice").await.unwrap_err();
        match err {
            SyncError::MaxRetriesExceeded {
                attempts,
                last_status,
                ..
            } => {
                assert_eq!(attempts, 2);
                assert_eq!(last_status, Some(200));
            }
            other => panic!("expected MaxRetriesExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_status_fails_without_retry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher(&server, 5).fetch("nobody").await.unwrap_err();
        assert!(matches!(err, SyncError::UnexpectedStatus { status: 404 }));
    }

    #[tokio::test]
    async fn base_game_failure_skips_expansion_fetch() {
        let server = MockServer::start().await;

        // Only the base-game slice is mocked, with a fatal status; any
        // expansion request would show up in the received-request count.
        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("excludesubtype", "boardgameexpansion"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher(&server, 5).fetch("alice").await.unwrap_err();
        assert!(matches!(err, SyncError::UnexpectedStatus { status: 400 }));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_username_never_hits_the_network() {
        let server = MockServer::start().await;

        let err = fetcher(&server, 5).fetch("   ").await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidUsername));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
