// tests/support.rs
//! Test fixtures — secrets, message bodies and scripted stores

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use login_masker::{LoginRow, LoginStore, MaskingSecret, SqliteLoginStore, StoreError};
use serde_json::{json, Value};
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_SECRET: &str = "test-masking-secret-2024";

#[allow(dead_code)]
pub fn test_secret() -> MaskingSecret {
    MaskingSecret::new(TEST_SECRET)
}

/// A well-formed login message body
#[allow(dead_code)]
pub fn login_body(user_id: &str, device_id: &str, ip: &str, app_version: &str) -> Vec<u8> {
    login_json(user_id, device_id, ip, app_version)
        .to_string()
        .into_bytes()
}

#[allow(dead_code)]
pub fn login_json(user_id: &str, device_id: &str, ip: &str, app_version: &str) -> Value {
    json!({
        "user_id": user_id,
        "device_type": "android",
        "device_id": device_id,
        "ip": ip,
        "locale": "RU",
        "app_version": app_version,
    })
}

/// Keeps every row in memory and counts collaborator calls
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingStore {
    pub rows: Vec<LoginRow>,
    pub insert_calls: usize,
    pub commits: usize,
}

impl LoginStore for RecordingStore {
    fn insert_login(&mut self, row: &LoginRow) -> Result<(), StoreError> {
        self.insert_calls += 1;
        self.rows.push(row.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.commits += 1;
        Ok(())
    }
}

/// Rejects rows for chosen users, or every commit
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct ScriptedStore {
    pub reject_users: HashSet<String>,
    pub fail_commit: bool,
    pub rows: Vec<LoginRow>,
}

#[allow(dead_code)]
impl ScriptedStore {
    pub fn rejecting(users: &[&str]) -> Self {
        Self {
            reject_users: users.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }
}

impl LoginStore for ScriptedStore {
    fn insert_login(&mut self, row: &LoginRow) -> Result<(), StoreError> {
        if let Some(user) = &row.user_id {
            if self.reject_users.contains(user) {
                return Err(StoreError::Rejected(format!("user {user} is locked")));
            }
        }
        self.rows.push(row.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.fail_commit {
            return Err(StoreError::Rejected("commit refused".into()));
        }
        Ok(())
    }
}

/// SQLite store in a throwaway directory
#[allow(dead_code)]
pub struct TempStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TempStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("user_logins.db");
        Self { dir, path }
    }

    pub fn open(&self) -> SqliteLoginStore {
        SqliteLoginStore::open(&self.path, Duration::from_millis(500)).expect("open login store")
    }
}
