// src/db/login_db_ops.rs
//! Row-level operations on `user_logins`

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use crate::event::LoginRow;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn insert_login_row(conn: &Connection, row: &LoginRow) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO user_logins (
            user_id, device_type, masked_ip, masked_device_id,
            locale, app_version, create_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            row.user_id,
            row.device_type,
            row.masked_ip,
            row.masked_device_id,
            row.locale,
            row.app_version,
            row.create_date.format(DATE_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn count_login_rows(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM user_logins", [], |row| row.get(0))
}

/// All rows in insertion order
pub fn fetch_login_rows(conn: &Connection) -> rusqlite::Result<Vec<LoginRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT user_id, device_type, masked_ip, masked_device_id,
               locale, app_version, create_date
        FROM user_logins
        ORDER BY id
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        let create_date: String = row.get(6)?;
        let create_date = NaiveDate::parse_from_str(&create_date, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
        Ok(LoginRow {
            user_id: row.get(0)?,
            device_type: row.get(1)?,
            masked_ip: row.get(2)?,
            masked_device_id: row.get(3)?,
            locale: row.get(4)?,
            app_version: row.get(5)?,
            create_date,
        })
    })?;

    rows.collect()
}
