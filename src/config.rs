use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{FEED_URL, FEED_USER_AGENT};

/// Default config file path.
pub const CONFIG_PATH: &str = "config.toml";

/// Top-level application config deserialized from `config.toml`.
///
/// Every field has a default, so a missing file yields a fully working config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Recent-results endpoint URL.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// User-Agent header sent with every feed request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of records kept from one fetch.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

/// Freshness cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached payload stays fresh.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

/// Analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many recent results the pattern catalog scans.
    #[serde(default = "default_pattern_window")]
    pub pattern_window: usize,
    /// IANA identifier of the civil zone results are bucketed in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the query endpoint listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_feed_url() -> String {
    FEED_URL.to_string()
}

fn default_user_agent() -> String {
    FEED_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_records() -> usize {
    200
}

fn default_ttl_secs() -> u64 {
    15
}

fn default_pattern_window() -> usize {
    90
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_records: default_max_records(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern_window: default_pattern_window(),
            timezone: default_timezone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            cache: CacheConfig::default(),
            analysis: AnalysisConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when the file is absent.
    ///
    /// A file that exists but fails to parse is still a hard error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse the configured timezone identifier.
    pub fn timezone(&self) -> Result<Tz> {
        self.analysis
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", self.analysis.timezone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_knob() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.feed.timeout_secs, 10);
        assert_eq!(cfg.feed.max_records, 200);
        assert_eq!(cfg.cache.ttl_secs, 15);
        assert_eq!(cfg.analysis.pattern_window, 90);
        assert_eq!(cfg.analysis.timezone, "America/Sao_Paulo");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str("[cache]\nttl_secs = 5\n").expect("valid toml");
        assert_eq!(cfg.cache.ttl_secs, 5);
        assert_eq!(cfg.feed.max_records, 200);
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:5000");
    }

    #[test]
    fn timezone_parses() {
        let cfg = AppConfig::default();
        assert!(cfg.timezone().is_ok());

        let mut bad = AppConfig::default();
        bad.analysis.timezone = "Mars/Olympus".to_string();
        assert!(bad.timezone().is_err());
    }
}
