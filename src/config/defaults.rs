// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{QueueSettings, SecretSettings, StoreSettings};
use crate::consts::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_MESSAGES, DEFAULT_SECRET_ENV, DEFAULT_SPOOL_DIR,
    DEFAULT_STORE_PATH, DEFAULT_WAIT_SECONDS,
};

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            spool_dir: PathBuf::from(DEFAULT_SPOOL_DIR),
            max_messages: DEFAULT_MAX_MESSAGES,
            wait_seconds: DEFAULT_WAIT_SECONDS,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl Default for SecretSettings {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_SECRET_ENV.into(),
        }
    }
}
