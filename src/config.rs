use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::wikipedia as wiki;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub wikipedia: WikipediaConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    /// MediaWiki action API used for full-text search.
    pub search_endpoint: String,

    /// REST page summary endpoint; the encoded title is appended as a path segment.
    pub summary_endpoint: String,

    /// Minimum spacing between two calls to the content service, process-wide.
    pub min_interval_ms: u64,

    /// Request timeout in seconds (default: 15)
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    /// Terms appended to the query, in order, when every primary hit is a
    /// disambiguation page.
    pub qualifiers: Vec<String>,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            search_endpoint: wiki::SEARCH_ENDPOINT.to_string(),
            summary_endpoint: wiki::SUMMARY_ENDPOINT.to_string(),
            min_interval_ms: wiki::MIN_INTERVAL_MS,
            request_timeout_seconds: wiki::REQUEST_TIMEOUT_SECONDS,
            user_agent: wiki::USER_AGENT.to_string(),
            qualifiers: wiki::QUALIFIERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl WikipediaConfig {
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            wikipedia: WikipediaConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("biodex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".biodex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.wikipedia.search_endpoint)
            .with_context(|| format!("Invalid search endpoint: {}", self.wikipedia.search_endpoint))?;

        url::Url::parse(&self.wikipedia.summary_endpoint).with_context(|| {
            format!(
                "Invalid summary endpoint: {}",
                self.wikipedia.summary_endpoint
            )
        })?;

        if self.wikipedia.request_timeout_seconds == 0 {
            anyhow::bail!("Wikipedia request timeout must be > 0");
        }

        if self.wikipedia.qualifiers.iter().any(|q| q.trim().is_empty()) {
            anyhow::bail!("Wikipedia qualifiers cannot contain empty entries");
        }

        Ok(())
    }
}
