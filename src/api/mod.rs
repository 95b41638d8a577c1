pub mod client;
pub mod dispatch;

pub use client::ApiClient;
pub use dispatch::{dispatch_effects, DispatchReport};

use crate::engine::{ScoreSubmission, TrackingEvent};
use crate::models::{GameKind, ScoreRecord, WordEntry};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API configuration: {0}")]
    Config(String),
}

/// Source of quiz words.
#[async_trait]
pub trait WordProvider: Send + Sync {
    async fn fetch_words(
        &self,
        game: GameKind,
        difficulty: Option<u8>,
    ) -> Result<Vec<WordEntry>, ApiError>;
}

/// Receives finished-session scores for the leaderboard.
#[async_trait]
pub trait ScoreReporter: Send + Sync {
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError>;
}

/// Receives one event per answered word.
#[async_trait]
pub trait TrackingReporter: Send + Sync {
    async fn track_answer(&self, event: &TrackingEvent) -> Result<(), ApiError>;
}

/// Serves the full score list for the statistics screen.
#[async_trait]
pub trait ScoreBoard: Send + Sync {
    async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ApiError>;
}
