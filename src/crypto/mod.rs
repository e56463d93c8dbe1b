// src/crypto/mod.rs
//! Field encryption scheme — no I/O, no database
//!
//! One payload = base64(salt ‖ iv ‖ AES-256-CBC(PKCS#7) ciphertext), with the
//! key derived by PBKDF2-HMAC-SHA256 from the masking secret and the salt.
//! Every call draws a fresh salt and IV from the OS CSPRNG.
mod decrypt;
mod encrypt;
mod kdf;
mod payload;

pub use decrypt::decrypt_field;
pub use encrypt::encrypt_field;
pub use kdf::derive_key;
pub use payload::EncodedPayload;

pub(crate) type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
pub(crate) type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
