// src/masker.rs
//! PII masking: reversible encryption of `device_id` and `ip`

use serde_json::Value;

use crate::aliases::MaskingSecret;
use crate::consts::PII_FIELDS;
use crate::crypto::encrypt_field;
use crate::error::EncryptionError;
use crate::event::{is_blank, MaskedLoginEvent, RawLoginEvent};

/// Return a masked copy of `event`; the input is left untouched
///
/// Non-empty text is replaced by its encrypted payload. Absent or blank
/// values become `null`. Any other value (a number, an object) cannot be
/// encrypted as text and fails the message.
pub fn mask_pii(
    event: &RawLoginEvent,
    secret: &MaskingSecret,
) -> Result<MaskedLoginEvent, EncryptionError> {
    let mut fields = event.fields().clone();

    for field in PII_FIELDS {
        let masked = match event.get(field) {
            Some(Value::String(plain)) if !plain.is_empty() => {
                Value::String(encrypt_field(plain, secret)?)
            }
            None => Value::Null,
            Some(value) if is_blank(value) => Value::Null,
            Some(_) => {
                return Err(EncryptionError::NotText {
                    field: field.to_owned(),
                })
            }
        };
        fields.insert(field.to_owned(), masked);
    }

    Ok(MaskedLoginEvent::new(fields))
}
