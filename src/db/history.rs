use crate::models::GameKind;
use rusqlite::{Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionRecord {
    pub player_name: String,
    pub game: GameKind,
    pub score: i64,
    pub questions_total: usize,
    pub correct_answers: usize,
    pub difficulty: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: u64,
    pub player_name: String,
    pub game: String,
    pub score: i64,
    pub questions_total: usize,
    pub correct_answers: usize,
    pub difficulty: Option<u8>,
    pub completed_at: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub fn record_session(conn: &Connection, record: &NewSessionRecord) -> Result<u64> {
    conn.execute(
        "INSERT INTO session_history
            (player_name, game, score, questions_total, correct_answers, difficulty, completed_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            record.player_name,
            record.game.as_str(),
            record.score,
            record.questions_total,
            record.correct_answers,
            record.difficulty,
            now()
        ],
    )?;

    Ok(conn.last_insert_rowid() as u64)
}

/// Most recent sessions first.
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<SessionSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, player_name, game, score, questions_total, correct_answers, difficulty, completed_at
         FROM session_history
         ORDER BY completed_at DESC, id DESC
         LIMIT ?",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(SessionSummary {
            id: row.get(0)?,
            player_name: row.get(1)?,
            game: row.get(2)?,
            score: row.get(3)?,
            questions_total: row.get(4)?,
            correct_answers: row.get(5)?,
            difficulty: row.get(6)?,
            completed_at: row.get(7)?,
        })
    })?;

    rows.collect()
}

pub fn personal_best(conn: &Connection, player_name: &str, game: GameKind) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT MAX(score) FROM session_history WHERE player_name = ? AND game = ?",
        rusqlite::params![player_name, game.as_str()],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn record(player: &str, game: GameKind, score: i64) -> NewSessionRecord {
        NewSessionRecord {
            player_name: player.to_string(),
            game,
            score,
            questions_total: 5,
            correct_answers: 3,
            difficulty: Some(2),
        }
    }

    #[test]
    fn test_record_and_list_session() {
        let conn = conn();
        let id = record_session(&conn, &record("Anna", GameKind::Articles, 15)).unwrap();
        assert_eq!(id, 1);

        let sessions = list_recent(&conn, 10).unwrap();
        assert_eq!(sessions.len(), 1);
        let s = &sessions[0];
        assert_eq!(s.player_name, "Anna");
        assert_eq!(s.game, "articles");
        assert_eq!(s.score, 15);
        assert_eq!(s.questions_total, 5);
        assert_eq!(s.correct_answers, 3);
        assert_eq!(s.difficulty, Some(2));
        assert!(s.completed_at > 0);
    }

    #[test]
    fn test_list_recent_newest_first_and_limited() {
        let conn = conn();
        for score in [1, 2, 3] {
            record_session(&conn, &record("Anna", GameKind::Vocabulary, score)).unwrap();
        }
        let sessions = list_recent(&conn, 2).unwrap();
        let scores: Vec<i64> = sessions.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![3, 2]);
    }

    #[test]
    fn test_personal_best_per_game() {
        let conn = conn();
        record_session(&conn, &record("Anna", GameKind::Articles, -5)).unwrap();
        record_session(&conn, &record("Anna", GameKind::Articles, 20)).unwrap();
        record_session(&conn, &record("Anna", GameKind::Vocabulary, 4)).unwrap();

        assert_eq!(personal_best(&conn, "Anna", GameKind::Articles).unwrap(), Some(20));
        assert_eq!(personal_best(&conn, "Anna", GameKind::Vocabulary).unwrap(), Some(4));
        assert_eq!(personal_best(&conn, "Ben", GameKind::Articles).unwrap(), None);
    }
}
