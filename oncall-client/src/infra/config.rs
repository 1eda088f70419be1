//! Client configuration: defaults, then a TOML file, then environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::error::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "ONCALL_API_URL";
pub const ENV_API_TOKEN: &str = "ONCALL_API_TOKEN";
pub const ENV_API_PATH: &str = "ONCALL_API_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// OnCall engine URL, e.g. `https://oncall.example.com`
    pub base_url: String,
    /// API prefix appended to `base_url`
    pub api_path: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    /// Default `perpage` for paginated integration fetches
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_path: "api/internal/v1".to_string(),
            api_token: None,
            timeout_secs: 30,
            page_size: 25,
        }
    }
}

impl ClientConfig {
    /// Default config file location: `<config_dir>/oncall-client/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("oncall-client").join("config.toml"))
    }

    /// Loads the config from `path` (or the default location when it
    /// exists), then applies environment overrides.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> ClientResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("[Config] Loaded {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ClientResult<Self> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Applies `ONCALL_*` overrides read through `lookup`.
    pub fn apply_env_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(path) = lookup(ENV_API_PATH).filter(|v| !v.trim().is_empty()) {
            self.api_path = path;
        }
    }

    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Config(e.to_string()))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Adds `http://` when no scheme is given and trims trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    if with_scheme != raw {
        log::warn!(
            "[Config] Normalized base URL from '{}' to '{}'",
            raw,
            with_scheme
        );
    }
    with_scheme
}
