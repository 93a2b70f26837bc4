//! Server configuration from environment variables

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "OBJSTUDIO_GEMINI_MODEL";
pub const ENV_URL: &str = "OBJSTUDIO_GEMINI_URL";
pub const ENV_BIND: &str = "OBJSTUDIO_BIND";
pub const ENV_TIMEOUT: &str = "OBJSTUDIO_GENERATION_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "OBJSTUDIO_EXPORT_DIR";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND: &str = "0.0.0.0:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// All server settings
#[derive(Clone, Serialize)]
pub struct ServerConfig {
    #[serde(skip)]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_url: String,
    pub bind: String,
    pub generation_timeout: Duration,
    pub export_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_url: DEFAULT_URL.to_string(),
            bind: DEFAULT_BIND.to_string(),
            generation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            export_dir: default_export_dir(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<set>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_url", &self.gemini_url)
            .field("bind", &self.bind)
            .field("generation_timeout", &self.generation_timeout)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}

/// Per-user data directory for exports, or `./exports`
pub fn default_export_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "objstudio", "objstudio")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from("exports"))
}

impl ServerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; missing or blank values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        config.gemini_api_key = get(ENV_API_KEY);
        if let Some(model) = get(ENV_MODEL) {
            config.gemini_model = model;
        }
        if let Some(url) = get(ENV_URL) {
            config.gemini_url = url.trim_end_matches('/').to_string();
        }
        if let Some(bind) = get(ENV_BIND) {
            config.bind = bind;
        }
        if let Some(secs) = get(ENV_TIMEOUT) {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.generation_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    "Invalid {}='{}', using {}s",
                    ENV_TIMEOUT,
                    secs,
                    DEFAULT_TIMEOUT_SECS
                ),
            }
        }
        if let Some(dir) = get(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }

        config
    }
}
