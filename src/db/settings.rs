use rusqlite::{Connection, OptionalExtension, Result};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PLAYER_NAME_KEY: &str = "playerName";

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, now()],
    )?;
    Ok(())
}

/// The remembered player name, if one was saved and is not blank.
pub fn load_player_name(conn: &Connection) -> Result<Option<String>> {
    Ok(get_setting(conn, PLAYER_NAME_KEY)?
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty()))
}

pub fn save_player_name(conn: &Connection, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    set_setting(conn, PLAYER_NAME_KEY, name)
}
