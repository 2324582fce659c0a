//! Publisher configuration.
//!
//! Loaded from a YAML file. The access token may be supplied through the
//! `B2_ACCESS_TOKEN` environment variable instead of the file, so tokens
//! stay out of checked-in configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Root configuration for the publisher service.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    pub repository: RepositoryConfig,
    pub community: CommunityConfig,
    /// Base URL under which deposited files are served locally; concatenated
    /// with the run's output path to mint the record's alternate identifier.
    pub local_base_url: String,
    /// Master switch: when false, records are built and printed but nothing
    /// is deposited.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Deposit repository endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    pub base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl RepositoryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Identifiers of the community the records are deposited into.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    /// Repository community identifier.
    pub id: Uuid,
    /// Key of the community-specific metadata block.
    pub specific_id: Uuid,
}

impl PublisherConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PublisherConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded publisher config");
        Ok(config)
    }

    /// Resolve the access token from the config file or the environment.
    pub fn access_token(&self) -> Result<String> {
        if let Some(token) = &self.repository.access_token {
            return Ok(token.clone());
        }
        std::env::var("B2_ACCESS_TOKEN")
            .context("No access token in config and B2_ACCESS_TOKEN is not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
repository:
  base_url: https://b2share.eudat.eu
  request_timeout_secs: 60

community:
  id: b344f92a-cd0e-4e4c-aa09-28b5f95f7e41
  specific_id: cee77dd0-9149-4a7b-9c28-85a8f7052bd9

local_base_url: "http://data.eiscat.se"
"#;

    #[test]
    fn test_parse_config() {
        let config: PublisherConfig = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(config.repository.base_url, "https://b2share.eudat.eu");
        assert_eq!(config.repository.request_timeout(), Duration::from_secs(60));
        assert_eq!(
            config.community.id.to_string(),
            "b344f92a-cd0e-4e4c-aa09-28b5f95f7e41"
        );
        assert!(config.enabled);
        assert_eq!(config.repository.access_token, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("publisher.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = PublisherConfig::load(&path).unwrap();
        assert_eq!(config.local_base_url, "http://data.eiscat.se");
    }

    #[test]
    fn test_invalid_community_id_rejected() {
        let yaml = CONFIG.replace("b344f92a-cd0e-4e4c-aa09-28b5f95f7e41", "not-a-uuid");
        assert!(serde_yaml::from_str::<PublisherConfig>(&yaml).is_err());
    }

    #[test]
    fn test_enabled_switch() {
        let yaml = format!("{}\nenabled: false\n", CONFIG);
        let config: PublisherConfig = serde_yaml::from_str(&yaml).unwrap();
        assert!(!config.enabled);
    }
}
