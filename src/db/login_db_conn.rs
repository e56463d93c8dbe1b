// src/db/login_db_conn.rs
use std::{fs, path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::StoreError;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS user_logins (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id          TEXT,
        device_type      TEXT,
        masked_ip        TEXT,
        masked_device_id TEXT,
        locale           TEXT,
        app_version      INTEGER,
        create_date      TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_user_logins_user_id ON user_logins(user_id);
    CREATE INDEX IF NOT EXISTS idx_user_logins_create_date ON user_logins(create_date);
"#;

/// SQLite takes the busy timeout as a C `int` of milliseconds
pub const MAX_BUSY_TIMEOUT_MS: u64 = i32::MAX as u64;

/// Open (or create) the login database and make sure `user_logins` exists
pub fn open_login_db<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Connection, StoreError> {
    if busy_timeout.as_millis() > u128::from(MAX_BUSY_TIMEOUT_MS) {
        return Err(StoreError::BusyTimeoutTooLarge {
            millis: busy_timeout.as_millis(),
            max: u128::from(MAX_BUSY_TIMEOUT_MS),
        });
    }

    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path.as_ref())?;
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn open_login_db_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
