// src/crypto/payload.rs
//! Stored payload layout: `salt(16) ‖ iv(16) ‖ ciphertext`, standard base64

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::consts::{BLOCK_LEN, IV_LEN, SALT_LEN};
use crate::error::EncryptionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl EncodedPayload {
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(SALT_LEN + IV_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.iv);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    /// Split a stored payload back into its parts
    ///
    /// The ciphertext must hold at least one whole block.
    pub fn parse(encoded: &str) -> Result<Self, EncryptionError> {
        let raw = STANDARD.decode(encoded.trim())?;
        let header = SALT_LEN + IV_LEN;
        if raw.len() < header + BLOCK_LEN || (raw.len() - header) % BLOCK_LEN != 0 {
            return Err(EncryptionError::Truncated { len: raw.len() });
        }

        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        salt.copy_from_slice(&raw[..SALT_LEN]);
        iv.copy_from_slice(&raw[SALT_LEN..header]);

        Ok(Self {
            salt,
            iv,
            ciphertext: raw[header..].to_vec(),
        })
    }
}
