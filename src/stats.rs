use crate::models::{GameKind, ScoreRecord};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAverage {
    pub player: String,
    pub average: f64,
    pub games_played: usize,
    pub best: f64,
}

impl PlayerAverage {
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average)
    }
}

/// Average score per player, in player-name order.
pub fn average_scores(records: &[ScoreRecord]) -> Vec<PlayerAverage> {
    let mut by_player: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_player
            .entry(record.player_name.as_str())
            .or_default()
            .push(record.score);
    }

    by_player
        .into_iter()
        .map(|(player, scores)| {
            let total: f64 = scores.iter().sum();
            let best = scores.iter().copied().fold(f64::MIN, f64::max);
            PlayerAverage {
                player: player.to_string(),
                average: total / scores.len() as f64,
                games_played: scores.len(),
                best,
            }
        })
        .collect()
}

/// Averages ranked best first; ties keep name order.
pub fn leaderboard(records: &[ScoreRecord], game: Option<GameKind>) -> Vec<PlayerAverage> {
    let filtered: Vec<ScoreRecord> = records
        .iter()
        .filter(|r| match game {
            Some(game) => r
                .game
                .as_deref()
                .and_then(GameKind::parse)
                .is_some_and(|g| g == game),
            None => true,
        })
        .cloned()
        .collect();

    let mut rows = average_scores(&filtered);
    rows.sort_by(|a, b| b.average.total_cmp(&a.average));
    rows
}

/// Bar chart data: one bar per player, averages rounded to whole points and
/// clamped at zero since bars cannot go negative.
pub fn chart_bars(rows: &[PlayerAverage]) -> Vec<(String, u64)> {
    rows.iter()
        .map(|row| (row.player.clone(), row.average.max(0.0).round() as u64))
        .collect()
}
