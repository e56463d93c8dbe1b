// src/crypto/kdf.rs
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::aliases::{DerivedKey32, MaskingSecret, RevealSecret};
use crate::consts::{KDF_ITERATIONS, SALT_LEN};

/// PBKDF2-HMAC-SHA256, [`KDF_ITERATIONS`] rounds, 32-byte output
pub fn derive_key(secret: &MaskingSecret, salt: &[u8; SALT_LEN]) -> DerivedKey32 {
    DerivedKey32::new_with(|key| {
        pbkdf2_hmac::<Sha256>(secret.expose_secret(), salt, KDF_ITERATIONS, key)
    })
}
