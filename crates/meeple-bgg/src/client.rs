// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote XML API.
//!
//! Owns request construction and the transient-status classification shared
//! by both fetchers. Response bodies are exposed as async byte streams so
//! arbitrarily large exports are never buffered whole.

use std::time::Duration;

use futures::TryStreamExt;
use reqwest::StatusCode;
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;

use meeple_core::{Subtype, SyncError};

/// HTTP client for the remote game-cataloging service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Creates a client against the given XML API base URL
    /// (e.g. `https://boardgamegeek.com/xmlapi2`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("meeple/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| SyncError::Network {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Requests one subtype-homogeneous slice of the user's collection.
    pub(crate) async fn get_collection(
        &self,
        username: &str,
        subtype: Subtype,
    ) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}/collection", self.base_url);
        let query: Vec<(&str, &str)> = match subtype {
            Subtype::BaseGame => vec![
                ("username", username),
                ("excludesubtype", "boardgameexpansion"),
            ],
            Subtype::Expansion => {
                vec![("username", username), ("subtype", "boardgameexpansion")]
            }
        };
        self.http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(map_send_err)
    }

    /// Requests one page of the user's play history.
    pub(crate) async fn get_plays(
        &self,
        username: &str,
        page: u32,
    ) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}/plays", self.base_url);
        let page = page.to_string();
        self.http
            .get(&url)
            .query(&[("username", username), ("page", page.as_str())])
            .send()
            .await
            .map_err(map_send_err)
    }
}

fn map_send_err(e: reqwest::Error) -> SyncError {
    SyncError::Network {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Statuses that mean "the export is still queuing or we are throttled":
/// 202 (explicitly queued), 429 (rate limited), and any 5xx.
pub(crate) fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::ACCEPTED
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

/// Bridges a response body into the async buffered reader the XML parsers
/// consume, without materializing the document.
pub(crate) fn body_reader(response: reqwest::Response) -> impl AsyncBufRead + Unpin + Send {
    StreamReader::new(response.bytes_stream().map_err(std::io::Error::other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses_cover_queued_throttled_and_server_errors() {
        assert!(is_transient(StatusCode::ACCEPTED));
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient(StatusCode::OK));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::BAD_REQUEST));
    }
}
