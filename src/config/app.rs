// src/config/app.rs
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::aliases::MaskingSecret;
use crate::db::MAX_BUSY_TIMEOUT_MS;
use crate::error::ConfigError;
use crate::pipeline::PipelineOptions;

/// Names the config file; falls back to [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_ENV: &str = "LOGIN_MASKER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "login-masker.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub queue: QueueSettings,
    pub store: StoreSettings,
    pub pipeline: PipelineSettings,
    pub secret: SecretSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    pub spool_dir: PathBuf,
    pub max_messages: usize,
    pub wait_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Off: messages stay on the queue unless acknowledgement is switched on
    pub ack_on_success: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecretSettings {
    /// Environment variable holding the masking secret
    pub env_var: String,
}

impl SecretSettings {
    pub fn load(&self) -> Result<MaskingSecret, ConfigError> {
        match env::var(&self.env_var) {
            Ok(value) if !value.is_empty() => Ok(MaskingSecret::new(value)),
            _ => Err(ConfigError::MissingSecret {
                var: self.env_var.clone(),
            }),
        }
    }
}

impl StoreSettings {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Config {
    /// Load from `$LOGIN_MASKER_CONFIG` (or the default path), then apply
    /// env overrides. A missing file means built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut conf = if path.exists() {
            Self::from_file(&path)?
        } else {
            warn!(path = %path.display(), "config file not found, using built-in defaults");
            Self::default()
        };

        super::env::apply_overrides(&mut conf)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Reject values the store or queue cannot represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            return Err(ConfigError::InvalidOverride {
                var: "store.busy_timeout_ms".into(),
                value: self.store.busy_timeout_ms.to_string(),
            });
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_messages: self.queue.max_messages,
            wait: Duration::from_secs(self.queue.wait_seconds),
            ack_on_success: self.pipeline.ack_on_success,
        }
    }
}
