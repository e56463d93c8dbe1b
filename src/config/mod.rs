// src/config/mod.rs
//! Configuration system for login-masker
//!
//! TOML file + env overrides, loaded into an owned [`Config`] that the
//! caller passes down. The masking secret itself is never read from the
//! file, only from the environment variable the file names.

pub use app::{
    Config, PipelineSettings, QueueSettings, SecretSettings, StoreSettings, CONFIG_ENV,
    DEFAULT_CONFIG_PATH,
};

mod app;
mod defaults;
mod env;
