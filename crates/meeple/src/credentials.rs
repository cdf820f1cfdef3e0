// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential provider backed by configuration, with CLI override.

use async_trait::async_trait;

use meeple_config::model::MeepleConfig;
use meeple_core::CredentialProvider;

/// Resolves the account to sync from `--username` or `bgg.username`.
pub struct ConfigCredentials {
    username: Option<String>,
}

impl ConfigCredentials {
    pub fn new(config: &MeepleConfig, override_username: Option<String>) -> Self {
        Self {
            username: override_username.or_else(|| config.bgg.username.clone()),
        }
    }
}

#[async_trait]
impl CredentialProvider for ConfigCredentials {
    async fn current_username(&self) -> Option<String> {
        self.username.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_username(username: Option<&str>) -> MeepleConfig {
        let mut config = MeepleConfig::default();
        config.bgg.username = username.map(str::to_string);
        config
    }

    #[tokio::test]
    async fn cli_override_wins_over_config() {
        let creds = ConfigCredentials::new(
            &config_with_username(Some("from-config")),
            Some("from-cli".into()),
        );
        assert_eq!(creds.current_username().await.as_deref(), Some("from-cli"));
    }

    #[tokio::test]
    async fn falls_back_to_configured_username() {
        let creds = ConfigCredentials::new(&config_with_username(Some("alice")), None);
        assert_eq!(creds.current_username().await.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn absent_everywhere_means_logged_out() {
        let creds = ConfigCredentials::new(&config_with_username(None), None);
        assert!(creds.current_username().await.is_none());
    }
}
