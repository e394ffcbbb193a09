use crate::utils::now_millis;
use rusqlite::{Connection, OptionalExtension, Result};

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
        row.get(0)
    })
    .optional()
}

/// Insert or overwrite; last write wins.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, now_millis()],
    )?;
    Ok(())
}

pub fn remove_value(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
    Ok(())
}
