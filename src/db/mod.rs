use rusqlite::{Connection, Result};
use std::path::{Path, PathBuf};

pub mod history;
pub mod settings;

fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\wortquiz")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/wortquiz")
    }
}

pub fn get_db_path() -> PathBuf {
    get_data_dir().join("wortquiz.db")
}

/// Opens (creating if needed) the local database and applies the schema.
pub fn init_db(path: Option<&Path>) -> Result<Connection> {
    let db_path = path.map(Path::to_path_buf).unwrap_or_else(get_db_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(&db_path)?;

    run_migrations(&conn)?;

    Ok(conn)
}

pub(crate) fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS session_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            player_name TEXT NOT NULL,
            game TEXT NOT NULL,
            score INTEGER NOT NULL,
            questions_total INTEGER NOT NULL,
            correct_answers INTEGER NOT NULL,
            difficulty INTEGER,
            completed_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_player ON session_history(player_name, game)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_completed ON session_history(completed_at)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_db_creates_tables() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("test.db");
        let conn = init_db(Some(&path)).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(path.exists());
        assert!(tables.contains(&"settings".to_string()));
        assert!(tables.contains(&"session_history".to_string()));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
    }

    #[test]
    fn test_default_db_path_name() {
        assert!(get_db_path().ends_with("wortquiz.db"));
    }
}
