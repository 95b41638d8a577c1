use crate::models::GameKind;
use serde::Serialize;

/// Side effects declared by a transition. The engine never performs them;
/// the caller hands them to whatever talks to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    TrackAnswer {
        word: String,
        was_correct: bool,
    },
    SubmitScore {
        player: String,
        game: GameKind,
        score: i64,
    },
}

impl Effect {
    pub fn is_score_submission(&self) -> bool {
        matches!(self, Effect::SubmitScore { .. })
    }
}

/// Body of `POST /update-tracking`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingEvent {
    pub word: String,
    #[serde(rename = "wasCorrect")]
    pub was_correct: bool,
}

/// Body of `POST /scores/submit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSubmission {
    pub player: String,
    pub game: GameKind,
    pub score: i64,
}
