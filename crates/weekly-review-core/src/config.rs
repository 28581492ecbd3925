//! Runtime settings, built once at startup and passed by reference

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EXTENSION: &str = "md";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fatal configuration problems, raised before any file I/O
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("vault path does not exist: {0}")]
    VaultNotFound(PathBuf),
}

/// Language model endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// LINE push credentials; both must be present for push to be attempted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSettings {
    pub channel_access_token: Option<String>,
    pub user_id: Option<String>,
}

impl LineSettings {
    pub fn is_configured(&self) -> bool {
        self.channel_access_token.is_some() && self.user_id.is_some()
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory holding the weekly files
    pub vault_path: Option<PathBuf>,

    /// Extension of weekly files, without the dot
    pub report_extension: String,

    pub openai: OpenAiSettings,

    pub line: LineSettings,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Directory for the log file; `None` uses the platform data dir
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            vault_path: None,
            report_extension: DEFAULT_EXTENSION.to_string(),
            openai: OpenAiSettings::default(),
            line: LineSettings::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::new();
        Self {
            vault_path: get("VAULT_PATH").map(|p| expand_home(&p)),
            report_extension: get("REPORT_EXTENSION")
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.report_extension),
            openai: OpenAiSettings {
                api_key: get("OPENAI_API_KEY"),
                model: get("OPENAI_MODEL").unwrap_or(defaults.openai.model),
                base_url: get("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.openai.base_url),
            },
            line: LineSettings {
                channel_access_token: get("LINE_CHANNEL_ACCESS_TOKEN"),
                user_id: get("LINE_USER_ID"),
            },
            log_level: get("LOG_LEVEL")
                .map(|level| level.to_lowercase())
                .unwrap_or(defaults.log_level),
            log_dir: get("WEEKLY_REVIEW_LOG_DIR").map(|p| expand_home(&p)),
        }
    }

    /// Override the vault root (CLI flag)
    pub fn with_vault(mut self, path: impl AsRef<str>) -> Self {
        self.vault_path = Some(expand_home(path.as_ref()));
        self
    }

    /// Vault root, checked for existence
    pub fn vault_root(&self) -> Result<&Path, ConfigError> {
        let path = self
            .vault_path
            .as_deref()
            .ok_or(ConfigError::Missing("VAULT_PATH"))?;
        if !path.is_dir() {
            return Err(ConfigError::VaultNotFound(path.to_path_buf()));
        }
        Ok(path)
    }

    pub fn openai_api_key(&self) -> Result<&str, ConfigError> {
        self.openai
            .api_key
            .as_deref()
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
