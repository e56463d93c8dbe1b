// src/version.rs
//! `app_version` normalization: "10.2.3" → 10

use serde_json::Value;

use crate::error::NormalizationError;
use crate::event::is_blank;

/// Leading integer of a dotted version
///
/// A version without any `.` yields `None`, even when it is a plain
/// integer ("10" → `None`); stored rows depend on that rule.
pub fn major_version(version: &str) -> Result<Option<i64>, NormalizationError> {
    let Some((major, _)) = version.split_once('.') else {
        return Ok(None);
    };

    major
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|source| NormalizationError::InvalidMajor {
            version: version.to_owned(),
            source,
        })
}

/// Normalize the raw `app_version` value of a message
pub fn normalize_app_version(value: Option<&Value>) -> Result<Option<i64>, NormalizationError> {
    match value {
        None => Ok(None),
        Some(Value::String(version)) => major_version(version),
        Some(other) if is_blank(other) => Ok(None),
        Some(_) => Err(NormalizationError::NotAString),
    }
}
