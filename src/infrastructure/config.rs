//! Application configuration
//!
//! Settings are grouped the way they are maintained: crawl pacing the user
//! may tune, site endpoints that only change when the DFA reorganizes its
//! pages, and output artifact paths. The configuration lives in a JSON file
//! under the system configuration directory and is created with defaults on
//! first run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::infrastructure::http_client::HttpClientConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub crawl: CrawlConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

/// Crawl pacing and HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Delay between per-country requests in milliseconds. Courtesy rate
    /// limiting for the DFA site, not adaptive backoff.
    pub request_delay_ms: u64,

    /// HTTP client settings (user agent, timeout, redirects).
    pub http: HttpClientConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            http: HttpClientConfig::default(),
        }
    }
}

/// DFA site endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Advisory index page listing all countries.
    pub index_url: String,

    /// Base for resolving relative country links.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_url: "https://www.ireland.ie/en/dfa/overseas-travel/advice/".to_string(),
            base_url: "https://www.ireland.ie".to_string(),
        }
    }
}

/// Output artifact paths and static export dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub html_path: PathBuf,
    pub png_path: PathBuf,
    pub png_width: u32,
    pub png_height: u32,
    pub png_scale: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("travel_advisories.csv"),
            html_path: PathBuf::from("travel_advisory_map.html"),
            png_path: PathBuf::from("travel_advisory_map.png"),
            png_width: 1920,
            png_height: 1080,
            png_scale: 2.0,
        }
    }
}

/// Loads and persists the JSON configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application's configuration directory.
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine system configuration directory")?
            .join("dfa-advisory-map");
        Ok(config_dir)
    }

    /// Manager for the default configuration file location.
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join("advisory_config.json");
        Ok(Self { config_path })
    }

    /// Manager for an explicit configuration file path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load the configuration, writing defaults on first run.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            let config = AppConfig::default();
            self.save_config(&config).await?;
            info!("Created default configuration at {:?}", self.config_path);
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config file {:?}", self.config_path))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", self.config_path))?;
        Ok(config)
    }

    /// Persist the configuration, creating the directory if needed.
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("Failed to create config directory {dir:?}"))?;
            }
        }

        let json =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, json)
            .await
            .with_context(|| format!("Failed to write config file {:?}", self.config_path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_match_the_site_contract() {
        let config = AppConfig::default();
        assert_eq!(config.crawl.request_delay_ms, 1000);
        assert_eq!(
            config.site.index_url,
            "https://www.ireland.ie/en/dfa/overseas-travel/advice/"
        );
        assert_eq!(config.output.png_width, 1920);
        assert_eq!(config.output.png_height, 1080);
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"crawl": {"request_delay_ms": 250}}"#).unwrap();
        assert_eq!(config.crawl.request_delay_ms, 250);
        assert_eq!(config.site.base_url, "https://www.ireland.ie");
        assert_eq!(config.output.csv_path, PathBuf::from("travel_advisories.csv"));
    }

    #[tokio::test]
    async fn first_load_writes_the_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("advisory_config.json");
        let manager = ConfigManager::with_path(path.clone());

        let config = manager.load_config().await.unwrap();
        assert!(path.exists());
        assert_eq!(config.crawl.request_delay_ms, 1000);

        // Second load reads the file it just wrote.
        let reloaded = manager.load_config().await.unwrap();
        assert_eq!(reloaded.site.index_url, config.site.index_url);
    }
}
