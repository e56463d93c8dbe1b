// src/crypto/decrypt.rs
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, KeyIvInit};

use super::{derive_key, Aes256CbcDec, EncodedPayload};
use crate::aliases::{MaskingSecret, RevealSecret};
use crate::error::EncryptionError;

/// Reverse [`super::encrypt_field`] — requires the same masking secret
///
/// The pipeline itself never calls this; it exists for secret holders
/// (the `reveal` command) and to prove stored payloads stay readable.
pub fn decrypt_field(payload: &str, secret: &MaskingSecret) -> Result<String, EncryptionError> {
    let parsed = EncodedPayload::parse(payload)?;
    let key = derive_key(secret, &parsed.salt);

    let plaintext = Aes256CbcDec::new(
        GenericArray::from_slice(key.expose_secret()),
        GenericArray::from_slice(&parsed.iv),
    )
    .decrypt_padded_vec_mut::<Pkcs7>(&parsed.ciphertext)
    .map_err(|_| EncryptionError::Padding)?;

    String::from_utf8(plaintext).map_err(|_| EncryptionError::NotUtf8)
}
