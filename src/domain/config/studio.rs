//! Typed configuration loaded from `storyframe.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::params::BoundsPolicy;

/// Root of `storyframe.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Image generation service settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StudioConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.generation.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Text-to-image service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Generation endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Base URL polled as `<status_url>/<request_id>` for asynchronous results.
    #[serde(default = "default_status_url")]
    pub status_url: Url,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Optional vendor model identifier.
    #[serde(default)]
    pub model_id: Option<String>,
    /// Upper bound on in-flight image requests.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give up polling after this many seconds.
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            status_url: default_status_url(),
            timeout_secs: default_timeout(),
            width: default_width(),
            height: default_height(),
            model_id: None,
            max_concurrent_requests: default_max_concurrent_requests(),
            poll_interval_ms: default_poll_interval_ms(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AppError::config_error("width and height must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(AppError::config_error("max_concurrent_requests must be greater than 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(AppError::config_error("poll_interval_ms must be greater than 0"));
        }
        if self.max_wait_secs == 0 {
            return Err(AppError::config_error("max_wait_secs must be greater than 0"));
        }
        if self.model_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(AppError::config_error("model_id must not be empty when set"));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://engine.prod.bria-api.com/v2/image/generate")
        .expect("Default API URL must be valid")
}

fn default_status_url() -> Url {
    Url::parse("https://engine.prod.bria-api.com/v2/status")
        .expect("Default status URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_max_concurrent_requests() -> usize {
    5
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_max_wait_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    /// Handling of numeric overrides outside their bound.
    #[serde(default)]
    pub out_of_range: BoundsPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Root directory for saved storyboards.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { output_dir: default_output_dir() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::config_error("output_dir must not be empty"));
        }
        Ok(())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}
