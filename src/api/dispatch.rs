use super::{ScoreReporter, TrackingReporter};
use crate::engine::{Effect, ScoreSubmission, TrackingEvent};
use crate::logger;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers an outbox of effects. Each effect is sent once; failures are
/// logged and counted, never retried.
pub async fn dispatch_effects<C>(client: &C, effects: &[Effect]) -> DispatchReport
where
    C: ScoreReporter + TrackingReporter + ?Sized,
{
    let mut report = DispatchReport::default();

    for effect in effects {
        let result = match effect {
            Effect::TrackAnswer { word, was_correct } => {
                let event = TrackingEvent {
                    word: word.clone(),
                    was_correct: *was_correct,
                };
                client.track_answer(&event).await.map_err(|e| {
                    format!("Error updating tracking for `{}`: {}", word, e)
                })
            }
            Effect::SubmitScore {
                player,
                game,
                score,
            } => {
                let submission = ScoreSubmission {
                    player: player.clone(),
                    game: *game,
                    score: *score,
                };
                client
                    .submit_score(&submission)
                    .await
                    .map_err(|e| format!("Error submitting result for {}: {}", player, e))
            }
        };

        match result {
            Ok(()) => report.delivered += 1,
            Err(message) => {
                logger::log(&message);
                report.failed += 1;
            }
        }
    }

    report
}

#[cfg(test)]
pub(crate) mod mock {
    use crate::api::{ApiError, ScoreBoard, ScoreReporter, TrackingReporter, WordProvider};
    use crate::engine::{ScoreSubmission, TrackingEvent};
    use crate::models::{GameKind, ScoreRecord, WordEntry};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory API that records every call.
    #[derive(Default)]
    pub struct RecordingApi {
        pub words: Vec<WordEntry>,
        pub scores: Vec<ScoreRecord>,
        pub fail_words: bool,
        pub fail_tracking: bool,
        pub fail_scores: bool,
        pub word_requests: Mutex<Vec<(GameKind, Option<u8>)>>,
        pub submissions: Mutex<Vec<ScoreSubmission>>,
        pub tracked: Mutex<Vec<TrackingEvent>>,
    }

    fn offline() -> ApiError {
        ApiError::Status {
            endpoint: "mock".to_string(),
            status: 503,
        }
    }

    #[async_trait]
    impl WordProvider for RecordingApi {
        async fn fetch_words(
            &self,
            game: GameKind,
            difficulty: Option<u8>,
        ) -> Result<Vec<WordEntry>, ApiError> {
            self.word_requests.lock().unwrap().push((game, difficulty));
            if self.fail_words {
                return Err(offline());
            }
            Ok(self.words.clone())
        }
    }

    #[async_trait]
    impl ScoreReporter for RecordingApi {
        async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
            self.submissions.lock().unwrap().push(submission.clone());
            if self.fail_scores {
                return Err(offline());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TrackingReporter for RecordingApi {
        async fn track_answer(&self, event: &TrackingEvent) -> Result<(), ApiError> {
            self.tracked.lock().unwrap().push(event.clone());
            if self.fail_tracking {
                return Err(offline());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ScoreBoard for RecordingApi {
        async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ApiError> {
            if self.fail_scores {
                return Err(offline());
            }
            Ok(self.scores.clone())
        }
    }
}
