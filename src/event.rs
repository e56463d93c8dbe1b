// src/event.rs
//! Login event shapes: raw message body → masked copy → persisted row

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::consts::{
    FIELD_DEVICE_ID, FIELD_DEVICE_TYPE, FIELD_IP, FIELD_LOCALE, FIELD_USER_ID,
};
use crate::error::ParseError;

/// Untyped login event exactly as received; every key is optional
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawLoginEvent(Map<String, Value>);

impl RawLoginEvent {
    /// Parse a message body; it must be a JSON object
    pub fn from_slice(body: &[u8]) -> Result<Self, ParseError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ParseError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawLoginEvent {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Copy of a [`RawLoginEvent`] whose `device_id` / `ip` hold either an
/// encrypted payload or `null`; all other keys are carried over unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedLoginEvent(Map<String, Value>);

impl MaskedLoginEvent {
    pub(crate) fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn masked_device_id(&self) -> Option<&str> {
        self.0.get(FIELD_DEVICE_ID).and_then(Value::as_str)
    }

    pub fn masked_ip(&self) -> Option<&str> {
        self.0.get(FIELD_IP).and_then(Value::as_str)
    }
}

/// One `user_logins` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRow {
    pub user_id: Option<String>,
    pub device_type: Option<String>,
    pub masked_ip: Option<String>,
    pub masked_device_id: Option<String>,
    pub locale: Option<String>,
    pub app_version: Option<i64>,
    pub create_date: NaiveDate,
}

impl LoginRow {
    /// Build the row from a masked event and its already normalized version
    pub fn from_masked(
        masked: &MaskedLoginEvent,
        app_version: Option<i64>,
        create_date: NaiveDate,
    ) -> Result<Self, ParseError> {
        let fields = masked.fields();
        Ok(Self {
            user_id: text_column(fields, FIELD_USER_ID)?,
            device_type: text_column(fields, FIELD_DEVICE_TYPE)?,
            masked_ip: masked.masked_ip().map(str::to_owned),
            masked_device_id: masked.masked_device_id().map(str::to_owned),
            locale: text_column(fields, FIELD_LOCALE)?,
            app_version,
            create_date,
        })
    }
}

/// Strings as-is, other scalars as their JSON text, absent/null as NULL
fn text_column(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, ParseError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Bool(_) | Value::Number(_))) => Ok(Some(v.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(ParseError::NotScalar {
            field: key.to_owned(),
        }),
    }
}

/// Falsy JSON values: null, "", false, 0, [] and {}
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
