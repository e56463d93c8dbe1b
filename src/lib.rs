// src/lib.rs
//! login-masker — pseudonymizes login events on their way to `user_logins`
//!
//! Features:
//! - AES-256-CBC field encryption, PBKDF2-HMAC-SHA256 keys, fresh salt + IV per field
//! - Reversible masking of `device_id` and `ip` (secret holders can reveal them)
//! - `app_version` reduced to its major number
//! - Per-message failure isolation within a batch
//! - Injected queue and store collaborators (spool directory, SQLite)

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod error;
pub mod event;
pub mod masker;
pub mod pipeline;
pub mod queue;
pub mod version;

// Re-export everything users need at the crate root
pub use aliases::MaskingSecret;
pub use config::Config;
pub use crypto::{decrypt_field, encrypt_field};
pub use db::{LoginStore, SqliteLoginStore};
pub use error::{
    EncryptionError, MessageError, NormalizationError, ParseError, PipelineError, QueueError,
    Stage, StoreError,
};
pub use event::{LoginRow, MaskedLoginEvent, RawLoginEvent};
pub use masker::mask_pii;
pub use pipeline::{process_message, BatchProcessor, BatchReport, FailedMessage, PipelineOptions};
pub use queue::{LoginQueue, MemoryQueue, QueueMessage, ReceiptHandle, SpoolDirQueue};
pub use version::{major_version, normalize_app_version};
