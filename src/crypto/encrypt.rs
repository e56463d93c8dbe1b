// src/crypto/encrypt.rs
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::TryRngCore;

use super::{derive_key, Aes256CbcEnc, EncodedPayload};
use crate::aliases::{MaskingSecret, RevealSecret};
use crate::consts::{IV_LEN, SALT_LEN};
use crate::error::EncryptionError;

/// Encrypt one field value → base64 payload (salt ‖ iv ‖ ciphertext)
///
/// Returns [`EncryptionError::Rng`] when the OS random source is unavailable.
/// Values that are not text are rejected earlier, by [`crate::masker::mask_pii`].
pub fn encrypt_field(plaintext: &str, secret: &MaskingSecret) -> Result<String, EncryptionError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.try_fill_bytes(&mut salt)?;
    let key = derive_key(secret, &salt);

    let mut iv = [0u8; IV_LEN];
    OsRng.try_fill_bytes(&mut iv)?;

    let ciphertext = Aes256CbcEnc::new(
        GenericArray::from_slice(key.expose_secret()),
        GenericArray::from_slice(&iv),
    )
    .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(EncodedPayload {
        salt,
        iv,
        ciphertext,
    }
    .encode())
}
