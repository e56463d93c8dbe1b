// src/aliases.rs
//! Secret-bearing types used throughout login-masker
//!
//! Built on secure-gate newtypes: zeroized on drop, `Debug` prints
//! `[REDACTED]`, and the bytes are reachable only through `expose_secret()`.

pub use secure_gate::{dynamic_newtype, fixed_newtype, RevealSecret, SecretLen};

use crate::consts::KEY_LEN;

// Process-wide masking secret (PBKDF2 password input), only ever built from
// configuration; see `crate::config::SecretSettings`
dynamic_newtype!(pub MaskingSecret, Vec<u8>, "Masking secret shared by every field payload");

// Per-payload AES-256 key derived from the secret and the payload's salt
fixed_newtype!(pub DerivedKey32, 32, "256-bit AES key derived by PBKDF2-HMAC-SHA256");

const _: () = assert!(KEY_LEN == 32);
