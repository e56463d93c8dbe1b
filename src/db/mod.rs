// src/db/mod.rs
//! Storage collaborator — where masked rows go
//!
//! The pipeline hands over one finished [`LoginRow`] at a time; transaction
//! and commit policy belong to the store.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::StoreError;
use crate::event::LoginRow;

pub mod login_db_conn;
pub mod login_db_ops;

pub use login_db_conn::{open_login_db, open_login_db_in_memory, MAX_BUSY_TIMEOUT_MS};
pub use login_db_ops::{count_login_rows, fetch_login_rows, insert_login_row};

pub trait LoginStore {
    fn insert_login(&mut self, row: &LoginRow) -> Result<(), StoreError>;

    /// Called once after every batch
    fn commit(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl<S: LoginStore + ?Sized> LoginStore for &mut S {
    fn insert_login(&mut self, row: &LoginRow) -> Result<(), StoreError> {
        (**self).insert_login(row)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        (**self).commit()
    }
}

/// `user_logins` table in a SQLite database
///
/// Each insert commits on its own (autocommit), so a failing row never
/// takes earlier rows of the batch down with it.
#[derive(Debug)]
pub struct SqliteLoginStore {
    conn: Connection,
}

impl SqliteLoginStore {
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_login_db(path, busy_timeout)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_login_db_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn count_rows(&self) -> Result<i64, StoreError> {
        Ok(count_login_rows(&self.conn)?)
    }

    pub fn fetch_all(&self) -> Result<Vec<LoginRow>, StoreError> {
        Ok(fetch_login_rows(&self.conn)?)
    }
}

impl LoginStore for SqliteLoginStore {
    fn insert_login(&mut self, row: &LoginRow) -> Result<(), StoreError> {
        insert_login_row(&self.conn, row)?;
        Ok(())
    }
}
