use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use tracing::debug;

use crate::api::ClientOptions;
use crate::viewer::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the artworks API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Extra attempts for transient failures
    pub max_retries: u32,

    /// Base delay for exponential backoff
    pub retry_delay_ms: u64,

    /// Number of page buttons in the pagination bar
    pub window_size: u32,

    /// User agent sent with every request
    pub user_agent: Option<String>,

    /// Directory for the log file
    pub data_dir: PathBuf,

    /// Explicit log file path, overrides `data_dir`
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let options = ClientOptions::default();
        Self {
            base_url: options.base_url,
            timeout_secs: options.timeout.as_secs(),
            max_retries: options.max_retries,
            retry_delay_ms: options.retry_delay_ms,
            window_size: DEFAULT_WINDOW_SIZE,
            user_agent: None,
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("artview"))
                .unwrap_or_else(|| PathBuf::from("./.artview")),
            log_file: None,
        }
    }
}

impl Config {
    /// Initialize configuration: defaults, then the first config file found,
    /// then environment variables
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_file(&Self::config_paths()).await? {
            Some(file_config) => file_config,
            None => Self::default(),
        };

        config.load_from_env();
        Ok(config)
    }

    /// Configuration file locations, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.artview.json"),
            PathBuf::from("./artview.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("artview").join("artview.json"));
        }
        paths
    }

    /// Load the first existing file among `paths`
    pub async fn load_from_file(paths: &[PathBuf]) -> Result<Option<Self>> {
        for path in paths {
            if path.exists() {
                debug!("Loading configuration from: {}", path.display());
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: Self = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid configuration in {}", path.display()))?;
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply `ARTVIEW_*` overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("ARTVIEW_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(timeout) = lookup("ARTVIEW_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = timeout;
        }

        if let Some(retries) = lookup("ARTVIEW_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.max_retries = retries;
        }

        if let Some(size) = lookup("ARTVIEW_WINDOW_SIZE").and_then(|v| v.parse().ok()) {
            self.window_size = size;
        }

        if let Some(log_file) = lookup("ARTVIEW_LOG_FILE") {
            self.log_file = Some(PathBuf::from(log_file));
        }
    }

    /// Where the interactive viewer writes its log
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("artview.log"))
    }

    /// Options for the HTTP client
    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("base_url is required"));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "base_url must start with http:// or https:// (got {})",
                base_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeout_secs must be greater than 0"));
        }

        if !(2..=MAX_WINDOW_SIZE).contains(&self.window_size) {
            return Err(anyhow::anyhow!(
                "window_size must be between 2 and {} (got {})",
                MAX_WINDOW_SIZE,
                self.window_size
            ));
        }

        Ok(())
    }
}
