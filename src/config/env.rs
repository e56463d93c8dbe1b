// src/config/env.rs
//! Environment overrides applied on top of the file

use std::env;
use std::path::PathBuf;

use crate::config::app::Config;
use crate::error::ConfigError;

pub const STORE_PATH_ENV: &str = "LOGIN_MASKER_STORE_PATH";
pub const SPOOL_DIR_ENV: &str = "LOGIN_MASKER_SPOOL_DIR";
pub const ACK_ON_SUCCESS_ENV: &str = "LOGIN_MASKER_ACK_ON_SUCCESS";

pub fn apply_overrides(conf: &mut Config) -> Result<(), ConfigError> {
    if let Ok(path) = env::var(STORE_PATH_ENV) {
        conf.store.path = PathBuf::from(path);
    }
    if let Ok(dir) = env::var(SPOOL_DIR_ENV) {
        conf.queue.spool_dir = PathBuf::from(dir);
    }
    if let Ok(flag) = env::var(ACK_ON_SUCCESS_ENV) {
        conf.pipeline.ack_on_success = parse_flag(ACK_ON_SUCCESS_ENV, &flag)?;
    }
    Ok(())
}

fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            var: var.to_owned(),
            value: value.to_owned(),
        }),
    }
}
