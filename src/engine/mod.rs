//! Quiz session state machine.
//!
//! `SessionState` is a plain value. Every transition consumes the old value
//! and returns a [`Step`] holding the new state plus the effects the caller
//! should deliver (answer tracking, score submission). Nothing in here does
//! I/O.

pub mod effects;
pub mod policy;

pub use effects::{Effect, ScoreSubmission, TrackingEvent};
pub use policy::{hint_for, AnswerMode, Direction, ScoringPolicy};

use crate::models::{Answer, GameKind, WordEntry};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("Please enter your name to start the game!")]
    EmptyPlayerName,
    #[error("The number of words must be at least 1")]
    ZeroWordCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub player_name: String,
    pub word_count: usize,
    pub difficulty: Option<u8>,
    pub hint_enabled: bool,
    pub game: GameKind,
    pub answer_mode: AnswerMode,
    pub scoring: ScoringPolicy,
}

impl SessionConfig {
    /// Config with the answer mode and scoring policy each game uses by default.
    pub fn new(game: GameKind, player_name: impl Into<String>, word_count: usize) -> Self {
        let (answer_mode, scoring) = match game {
            GameKind::Articles => (AnswerMode::Article, ScoringPolicy::Streak),
            GameKind::Vocabulary => (
                AnswerMode::FreeText(Direction::TranslationToWord),
                ScoringPolicy::Simple,
            ),
        };
        Self {
            player_name: player_name.into(),
            word_count,
            difficulty: None,
            hint_enabled: false,
            game,
            answer_mode,
            scoring,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets which side of the word is asked for. The article game has no
    /// direction and ignores this.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        if let AnswerMode::FreeText(_) = self.answer_mode {
            self.answer_mode = AnswerMode::FreeText(direction);
        }
        self
    }

    pub fn with_hint(mut self, hint_enabled: bool) -> Self {
        self.hint_enabled = hint_enabled;
        self
    }

    pub fn validate(&self) -> Result<(), StartError> {
        if self.player_name.trim().is_empty() {
            return Err(StartError::EmptyPlayerName);
        }
        if self.word_count == 0 {
            return Err(StartError::ZeroWordCount);
        }
        Ok(())
    }
}

/// What happened to one question, kept for the summary screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub word: String,
    pub expected: String,
    pub given: String,
    pub correct: bool,
    pub points_delta: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress { answered: bool },
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub config: SessionConfig,
    pub pool: Vec<WordEntry>,
    pub current_index: usize,
    pub points: i64,
    pub correct_streak: u32,
    pub answered: bool,
    pub last_answer_correct: Option<bool>,
    pub completed: bool,
    pub score_submitted: bool,
    pub outcomes: Vec<AnswerOutcome>,
}

/// Result of a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Step {
    fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Shuffles `pool`, keeps the first `config.word_count` entries and builds a
/// fresh session. Short or empty pools give a shorter session, not an error.
pub fn start_session<R: Rng + ?Sized>(
    config: SessionConfig,
    mut pool: Vec<WordEntry>,
    rng: &mut R,
) -> Result<SessionState, StartError> {
    config.validate()?;

    let config = SessionConfig {
        player_name: config.player_name.trim().to_string(),
        ..config
    };

    pool.shuffle(rng);
    pool.truncate(config.word_count);

    Ok(SessionState {
        completed: pool.is_empty(),
        config,
        pool,
        current_index: 0,
        points: 0,
        correct_streak: 0,
        answered: false,
        last_answer_correct: None,
        score_submitted: false,
        outcomes: Vec::new(),
    })
}

impl SessionState {
    /// Scores the answer to the current question. A second answer to the same
    /// question, or any answer after completion, is ignored.
    pub fn submit_answer(mut self, answer: &Answer) -> Step {
        if self.answered || self.completed {
            return Step::unchanged(self);
        }
        let Some(entry) = self.pool.get(self.current_index) else {
            return Step::unchanged(self);
        };

        let mode = self.config.answer_mode;
        let correct = mode.is_correct(entry, answer);
        let streak = if correct { self.correct_streak + 1 } else { 0 };
        let delta = self.config.scoring.points_delta(correct, streak);

        let outcome = AnswerOutcome {
            word: entry.word.clone(),
            expected: mode.expected_answer(entry),
            given: match answer {
                Answer::Article(choice) => choice.label().to_string(),
                Answer::Text(text) => text.trim().to_string(),
            },
            correct,
            points_delta: delta,
        };
        let effect = Effect::TrackAnswer {
            word: entry.word.clone(),
            was_correct: correct,
        };

        self.correct_streak = streak;
        self.points += delta;
        self.answered = true;
        self.last_answer_correct = Some(correct);
        self.outcomes.push(outcome);

        Step {
            state: self,
            effects: vec![effect],
        }
    }

    /// Moves to the next question once the current one has been answered.
    /// Finishing the last question emits the score submission, once.
    pub fn advance(mut self) -> Step {
        if !self.answered || self.completed {
            return Step::unchanged(self);
        }

        self.current_index += 1;
        self.answered = false;
        self.last_answer_correct = None;

        let mut effects = Vec::new();
        if self.current_index >= self.pool.len() {
            self.completed = true;
            if !self.score_submitted {
                self.score_submitted = true;
                effects.push(Effect::SubmitScore {
                    player: self.config.player_name.clone(),
                    game: self.config.game,
                    score: self.points,
                });
            }
        }

        Step {
            state: self,
            effects,
        }
    }

    pub fn current_word(&self) -> Option<&WordEntry> {
        if self.completed {
            return None;
        }
        self.pool.get(self.current_index)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// 1-based number of the question on screen, capped at the session length.
    pub fn question_number(&self) -> usize {
        (self.current_index + 1).min(self.pool.len())
    }

    pub fn progress_percent(&self) -> u16 {
        if self.pool.is_empty() {
            return 100;
        }
        let done = if self.completed {
            self.pool.len()
        } else {
            self.current_index + 1
        };
        ((done * 100) / self.pool.len()) as u16
    }

    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else {
            Phase::InProgress {
                answered: self.answered,
            }
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.current_word()
            .map(|entry| self.config.answer_mode.prompt(entry))
    }

    pub fn expected_answer(&self) -> Option<String> {
        self.current_word()
            .map(|entry| self.config.answer_mode.expected_answer(entry))
    }

    /// First letters of the expected answer when hints are switched on.
    pub fn hint(&self) -> Option<String> {
        if !self.config.hint_enabled {
            return None;
        }
        let entry = self.current_word()?;
        match self.config.answer_mode {
            AnswerMode::FreeText(Direction::TranslationToWord) => Some(hint_for(&entry.word)),
            AnswerMode::FreeText(Direction::WordToTranslation) => {
                Some(entry.translation.chars().take(3).collect())
            }
            AnswerMode::Article => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ArticleChoice, PLURAL_MARKER};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn word(word: &str, article: Article, translation: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            article: Some(article),
            translation: translation.to_string(),
            success_rate: 50.0,
        }
    }

    fn sample_pool() -> Vec<WordEntry> {
        vec![
            word("Haus", Article::Das, "house"),
            word("Tisch", Article::Der, "table"),
            word("Frau", Article::Die, "woman"),
            word("Kinder", Article::Die, PLURAL_MARKER),
            word("Auto", Article::Das, "car"),
        ]
    }

    fn articles_config(word_count: usize) -> SessionConfig {
        SessionConfig::new(GameKind::Articles, "Anna", word_count)
    }

    fn started(word_count: usize, pool: Vec<WordEntry>) -> SessionState {
        let mut rng = StdRng::seed_from_u64(7);
        start_session(articles_config(word_count), pool, &mut rng).unwrap()
    }

    fn right_answer(state: &SessionState) -> Answer {
        let entry = state.current_word().unwrap();
        if entry.is_plural() {
            Answer::Article(ArticleChoice::DiePlural)
        } else {
            Answer::Article(ArticleChoice::from(entry.article.unwrap()))
        }
    }

    fn wrong_answer(state: &SessionState) -> Answer {
        let entry = state.current_word().unwrap();
        let wrong = if entry.article == Some(Article::Der) {
            ArticleChoice::Das
        } else {
            ArticleChoice::Der
        };
        Answer::Article(wrong)
    }

    #[test]
    fn test_start_session_initial_state() {
        let state = started(3, sample_pool());
        assert_eq!(state.len(), 3);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.points, 0);
        assert_eq!(state.correct_streak, 0);
        assert!(!state.answered);
        assert!(state.last_answer_correct.is_none());
        assert!(!state.completed);
        assert_eq!(state.phase(), Phase::InProgress { answered: false });
    }

    #[test]
    fn test_start_session_length_is_min_of_count_and_pool() {
        for (count, expected) in [(1, 1), (3, 3), (5, 5), (9, 5)] {
            let state = started(count, sample_pool());
            assert_eq!(state.len(), expected, "word_count {}", count);
        }
    }

    #[test]
    fn test_start_session_draws_distinct_input_entries() {
        let input = sample_pool();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = start_session(articles_config(4), input.clone(), &mut rng).unwrap();
            let words: HashSet<&str> = state.pool.iter().map(|w| w.word.as_str()).collect();
            assert_eq!(words.len(), 4);
            for entry in &state.pool {
                assert!(input.contains(entry));
            }
        }
    }

    #[test]
    fn test_shuffle_changes_order_for_some_seed() {
        let input = sample_pool();
        let reordered = (0..20).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = start_session(articles_config(5), input.clone(), &mut rng).unwrap();
            state.pool != input
        });
        assert!(reordered);
    }

    #[test]
    fn test_empty_pool_completes_immediately() {
        let state = started(5, Vec::new());
        assert!(state.completed);
        assert!(state.is_empty());
        assert!(state.current_word().is_none());
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn test_empty_player_name_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SessionConfig::new(GameKind::Vocabulary, "   ", 5);
        let err = start_session(config, sample_pool(), &mut rng).unwrap_err();
        assert_eq!(err, StartError::EmptyPlayerName);
        assert_eq!(
            err.to_string(),
            "Please enter your name to start the game!"
        );
    }

    #[test]
    fn test_zero_word_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = start_session(articles_config(0), sample_pool(), &mut rng).unwrap_err();
        assert_eq!(err, StartError::ZeroWordCount);
    }

    #[test]
    fn test_player_name_is_trimmed() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SessionConfig::new(GameKind::Articles, "  Anna ", 2);
        let state = start_session(config, sample_pool(), &mut rng).unwrap();
        assert_eq!(state.config.player_name, "Anna");
    }

    #[test]
    fn test_default_strategies_per_game() {
        let articles = SessionConfig::new(GameKind::Articles, "A", 1);
        assert_eq!(articles.answer_mode, AnswerMode::Article);
        assert_eq!(articles.scoring, ScoringPolicy::Streak);

        let vocab = SessionConfig::new(GameKind::Vocabulary, "A", 1);
        assert_eq!(
            vocab.answer_mode,
            AnswerMode::FreeText(Direction::TranslationToWord)
        );
        assert_eq!(vocab.scoring, ScoringPolicy::Simple);
    }

    #[test]
    fn test_submit_answer_marks_answered_and_tracks() {
        let state = started(3, sample_pool());
        let answer = right_answer(&state);
        let word = state.current_word().unwrap().word.clone();

        let step = state.submit_answer(&answer);
        assert!(step.state.answered);
        assert_eq!(step.state.last_answer_correct, Some(true));
        assert_eq!(step.state.current_index, 0);
        assert_eq!(step.state.points, 5);
        assert_eq!(
            step.effects,
            vec![Effect::TrackAnswer {
                word,
                was_correct: true
            }]
        );
    }

    #[test]
    fn test_submit_answer_twice_is_noop() {
        let state = started(3, sample_pool());
        let answer = right_answer(&state);

        let once = state.submit_answer(&answer);
        let second = wrong_answer(&once.state);
        let twice = once.state.clone().submit_answer(&second);
        assert_eq!(twice.state, once.state);
        assert!(twice.effects.is_empty());
    }

    #[test]
    fn test_incorrect_answer_costs_points_and_resets_streak() {
        let mut state = started(3, sample_pool());
        state.correct_streak = 3;
        state.points = 20;
        let answer = wrong_answer(&state);

        let step = state.submit_answer(&answer);
        assert_eq!(step.state.points, 15);
        assert_eq!(step.state.correct_streak, 0);
        assert_eq!(step.state.last_answer_correct, Some(false));
    }

    #[test]
    fn test_fifth_streak_answer_earns_bonus() {
        let mut state = started(3, sample_pool());
        state.correct_streak = 4;
        let answer = right_answer(&state);

        let step = state.submit_answer(&answer);
        assert_eq!(step.state.points, 15);
        assert_eq!(step.state.correct_streak, 5);
    }

    #[test]
    fn test_streak_below_bonus_earns_five() {
        for streak in 0..=3 {
            let mut state = started(3, sample_pool());
            state.correct_streak = streak;
            let answer = right_answer(&state);
            let step = state.submit_answer(&answer);
            assert_eq!(step.state.points, 5, "streak {}", streak);
        }
    }

    #[test]
    fn test_simple_policy_counts_correct_answers() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = articles_config(5).with_scoring(ScoringPolicy::Simple);
        let mut state = start_session(config, sample_pool(), &mut rng).unwrap();
        state.correct_streak = 4;

        let answer = right_answer(&state);
        let step = state.submit_answer(&answer);
        assert_eq!(step.state.points, 1);

        let step = step.state.advance();
        let answer = wrong_answer(&step.state);
        let step = step.state.submit_answer(&answer);
        assert_eq!(step.state.points, 1);
        assert_eq!(step.state.correct_streak, 0);
    }

    #[test]
    fn test_advance_requires_answer() {
        let state = started(3, sample_pool());
        let step = state.clone().advance();
        assert_eq!(step.state, state);
        assert!(step.effects.is_empty());
    }

    #[test]
    fn test_advance_moves_by_exactly_one() {
        let mut state = started(5, sample_pool());
        for expected in 1..=5 {
            let answer = right_answer(&state);
            state = state.submit_answer(&answer).state;
            state = state.advance().state;
            assert_eq!(state.current_index, expected);
            assert!(!state.answered);
            assert!(state.last_answer_correct.is_none());
        }
        assert!(state.completed);
    }

    #[test]
    fn test_completion_submits_score_once() {
        let state = started(2, sample_pool());
        let mut submissions = Vec::new();

        let answer = right_answer(&state);
        let step = state.submit_answer(&answer);
        let step = step.state.advance();
        submissions.extend(step.effects.into_iter().filter(Effect::is_score_submission));

        let answer = wrong_answer(&step.state);
        let step = step.state.submit_answer(&answer);
        let step = step.state.advance();
        submissions.extend(step.effects.into_iter().filter(Effect::is_score_submission));

        let after = step.state.clone().advance();
        assert!(after.effects.is_empty());
        let after = after.state.submit_answer(&Answer::Article(ArticleChoice::Der));
        assert!(after.effects.is_empty());

        assert_eq!(
            submissions,
            vec![Effect::SubmitScore {
                player: "Anna".to_string(),
                game: GameKind::Articles,
                score: 0,
            }]
        );
        assert!(step.state.completed);
        assert!(step.state.score_submitted);
    }

    #[test]
    fn test_outcomes_record_each_answer() {
        let state = started(2, sample_pool());
        let answer = wrong_answer(&state);
        let expected = state.expected_answer().unwrap();
        let step = state.submit_answer(&answer);

        let outcome = &step.state.outcomes[0];
        assert!(!outcome.correct);
        assert_eq!(outcome.expected, expected);
        assert_eq!(outcome.points_delta, -5);
        assert_eq!(step.state.correct_count(), 0);
    }

    #[test]
    fn test_progress_and_question_number() {
        let state = started(4, sample_pool());
        assert_eq!(state.question_number(), 1);
        assert_eq!(state.progress_percent(), 25);

        let answer = right_answer(&state);
        let state = state.submit_answer(&answer).state.advance().state;
        assert_eq!(state.question_number(), 2);
        assert_eq!(state.progress_percent(), 50);
    }

    #[test]
    fn test_hint_only_when_enabled_in_vocabulary_mode() {
        let pool = vec![WordEntry {
            word: "der Hund".to_string(),
            article: None,
            translation: "dog".to_string(),
            success_rate: 0.0,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let config = SessionConfig::new(GameKind::Vocabulary, "Ben", 1);
        let plain = start_session(config.clone(), pool.clone(), &mut rng).unwrap();
        assert!(plain.hint().is_none());

        let hinted = start_session(config.with_hint(true), pool, &mut rng).unwrap();
        assert_eq!(hinted.hint().as_deref(), Some("Hun"));
        assert_eq!(hinted.prompt(), Some("dog"));
    }

    #[test]
    fn test_direction_switches_prompt_answer_and_hint() {
        let pool = vec![WordEntry {
            word: "der Hund".to_string(),
            article: None,
            translation: "dog".to_string(),
            success_rate: 0.0,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let config = SessionConfig::new(GameKind::Vocabulary, "Ben", 1)
            .with_direction(Direction::WordToTranslation)
            .with_hint(true);
        assert_eq!(
            config.answer_mode,
            AnswerMode::FreeText(Direction::WordToTranslation)
        );

        let state = start_session(config, pool, &mut rng).unwrap();
        assert_eq!(state.prompt(), Some("der Hund"));
        assert_eq!(state.expected_answer().as_deref(), Some("dog"));
        assert_eq!(state.hint().as_deref(), Some("dog"));

        let step = state.submit_answer(&Answer::Text(" Dog ".to_string()));
        assert_eq!(step.state.last_answer_correct, Some(true));
    }

    #[test]
    fn test_direction_does_not_apply_to_articles() {
        let config = SessionConfig::new(GameKind::Articles, "Ben", 1)
            .with_direction(Direction::WordToTranslation);
        assert_eq!(config.answer_mode, AnswerMode::Article);
    }
}
