use crate::db::history::SessionSummary;
use crate::models::GameKind;
use std::time::{Duration, UNIX_EPOCH};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

pub fn format_session_date(timestamp: u64) -> String {
    format_session_date_on(timestamp, chrono::Local::now().date_naive())
}

fn format_session_date_on(timestamp: u64, today: chrono::NaiveDate) -> String {
    let session_time = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = session_time.into();
    let session_date = datetime.date_naive();

    if session_date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if session_date == today - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

/// One line of the home screen's history list.
pub fn format_session_item(session: &SessionSummary) -> String {
    let game = GameKind::parse(&session.game)
        .map(|g| g.title())
        .unwrap_or(session.game.as_str());
    format!(
        "{} - {} - {}: {} pts ({}/{})",
        format_session_date(session.completed_at),
        session.player_name,
        game,
        session.score,
        session.correct_answers,
        session.questions_total
    )
}
