// src/error.rs
//! Public error types for the entire crate
//!
//! Message-scoped failures ([`MessageError`]) never abort a batch; they are
//! collected into the batch report. Only queue and commit failures
//! ([`PipelineError`]) end a run early.

use std::fmt;
use std::path::PathBuf;

use rand::rand_core::OsError;
use thiserror::Error;

use crate::pipeline::BatchReport;

#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("secure random source unavailable: {0}")]
    Rng(#[from] OsError),

    #[error("field `{field}` is not text and cannot be encrypted")]
    NotText { field: String },

    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("payload is truncated or not block aligned ({len} bytes)")]
    Truncated { len: usize },

    #[error("padding check failed: wrong secret or corrupted payload")]
    Padding,

    #[error("decrypted field is not valid UTF-8")]
    NotUtf8,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("message body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message body is JSON but not an object")]
    NotAnObject,

    #[error("field `{field}` must be a string or scalar")]
    NotScalar { field: String },
}

#[derive(Error, Debug)]
pub enum NormalizationError {
    #[error("app_version must be a string")]
    NotAString,

    #[error("app_version `{version}` has a non-numeric major segment")]
    InvalidMajor {
        version: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row rejected by store: {0}")]
    Rejected(String),

    #[error("busy timeout of {millis} ms exceeds the SQLite limit of {max} ms")]
    BusyTimeoutTooLarge { millis: u128, max: u128 },
}

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown receipt handle `{0}`")]
    UnknownHandle(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("masking secret missing: set the `{var}` environment variable")]
    MissingSecret { var: String },

    #[error("invalid value `{value}` for `{var}`")]
    InvalidOverride { var: String, value: String },
}

/// Where in the per-message chain a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Mask,
    Normalize,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Mask => "mask",
            Stage::Normalize => "normalize",
            Stage::Persist => "persist",
        })
    }
}

/// Failure of a single message; the batch carries on
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("masking failed: {0}")]
    Encryption(#[from] EncryptionError),

    #[error("version normalization failed: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("persisting row failed: {0}")]
    Persistence(#[from] StoreError),
}

impl MessageError {
    pub fn stage(&self) -> Stage {
        match self {
            MessageError::Parse(_) => Stage::Parse,
            MessageError::Encryption(_) => Stage::Mask,
            MessageError::Normalization(_) => Stage::Normalize,
            MessageError::Persistence(_) => Stage::Persist,
        }
    }
}

/// Batch-scoped failure
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("commit after batch failed: {source}")]
    Commit {
        report: Box<BatchReport>,
        #[source]
        source: StoreError,
    },
}
