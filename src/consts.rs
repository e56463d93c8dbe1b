// src/consts.rs
//! Shared constants — encryption scheme parameters and pipeline defaults
//!
//! The scheme values are part of the stored payload format. Changing any of
//! them makes previously stored `masked_ip` / `masked_device_id` values
//! unreadable, so a change needs a new, versioned scheme.

/// Random salt prepended to every payload
pub const SALT_LEN: usize = 16;

/// CBC initialization vector, stored right after the salt
pub const IV_LEN: usize = 16;

/// AES-256 key size produced by the KDF
pub const KEY_LEN: usize = 32;

/// AES block size (PKCS#7 pads to this)
pub const BLOCK_LEN: usize = 16;

/// PBKDF2-HMAC-SHA256 rounds
pub const KDF_ITERATIONS: u32 = 100_000;

/// Upper bound of messages pulled per batch
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Long-poll wait for a batch, in seconds
pub const DEFAULT_WAIT_SECONDS: u64 = 5;

/// How long a store write may wait on a locked database, in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default SQLite file holding `user_logins`
pub const DEFAULT_STORE_PATH: &str = "data/user_logins.db";

/// Default spool directory read by the directory queue
pub const DEFAULT_SPOOL_DIR: &str = "data/login-queue";

/// Environment variable that holds the masking secret
pub const DEFAULT_SECRET_ENV: &str = "LOGIN_MASKER_SECRET";

// Message keys
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_DEVICE_TYPE: &str = "device_type";
pub const FIELD_DEVICE_ID: &str = "device_id";
pub const FIELD_IP: &str = "ip";
pub const FIELD_LOCALE: &str = "locale";
pub const FIELD_APP_VERSION: &str = "app_version";

/// Fields that never leave the masker in plaintext
pub const PII_FIELDS: [&str; 2] = [FIELD_DEVICE_ID, FIELD_IP];
