//! Runtime configuration
//!
//! Resolution order for every setting: environment, then the YAML file in
//! the config directory, then the built-in default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_LOG_FILE,
    TOKEN_FILE_NAME,
};
use crate::error::ConfigError;

/// Contents of `config.yaml`; every key is optional
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: Url,
    /// `None` means requests never time out
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub config_dir: PathBuf,
}

impl Config {
    /// Load `.env`, the config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = default_config_dir();
        let file = read_file_config(&config_dir.join(CONFIG_FILE_NAME))?;
        let env_url = std::env::var(API_URL_ENV).ok();

        Self::resolve(config_dir, file, env_url)
    }

    pub fn resolve(
        config_dir: PathBuf,
        file: FileConfig,
        env_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw_url = env_url
            .filter(|u| !u.trim().is_empty())
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config {
            api_url: parse_api_url(&raw_url)?,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
            log_file: file
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            config_dir,
        })
    }

    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join(TOKEN_FILE_NAME)
    }
}

/// `~/.coursedesk`, or `./.coursedesk` without a home directory
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// A missing file is an empty config, a malformed one is an error
pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidUrl(raw.to_string())),
    }
}
