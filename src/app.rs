use crate::config::{AppConfig, MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::db;
use crate::db::history::{NewSessionRecord, SessionSummary};
use crate::engine::{start_session, Direction, Effect, ScoringPolicy, SessionConfig};
use crate::logger;
use crate::models::{ApiRequest, ApiResponse, AppState, GameKind, ScoreRecord};
use crate::session::{handle_quiz_input, QuizSession};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;

pub const HISTORY_LIMIT: usize = 10;
pub const MAX_WORD_COUNT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    Play(GameKind),
    Statistics,
    Quit,
}

pub const HOME_ENTRIES: [HomeEntry; 4] = [
    HomeEntry::Play(GameKind::Articles),
    HomeEntry::Play(GameKind::Vocabulary),
    HomeEntry::Statistics,
    HomeEntry::Quit,
];

impl HomeEntry {
    pub fn label(&self) -> &'static str {
        match self {
            HomeEntry::Play(game) => game.title(),
            HomeEntry::Statistics => "Statistics",
            HomeEntry::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    PlayerName,
    WordCount,
    Difficulty,
    Direction,
    Hint,
    Scoring,
}

impl SetupField {
    pub const ALL: [SetupField; 6] = [
        SetupField::PlayerName,
        SetupField::WordCount,
        SetupField::Difficulty,
        SetupField::Direction,
        SetupField::Hint,
        SetupField::Scoring,
    ];

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The pre-game form. The vocabulary game offers difficulty and hints, the
/// article game picks words at random.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub game: GameKind,
    pub player_name: String,
    pub word_count: usize,
    pub difficulty: u8,
    pub direction: Direction,
    pub hint_enabled: bool,
    pub scoring: ScoringPolicy,
    pub focused: SetupField,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn new(game: GameKind, player_name: String, config: &AppConfig) -> Self {
        let defaults = SessionConfig::new(game, player_name.clone(), config.default_word_count);
        Self {
            game,
            player_name,
            word_count: config.default_word_count,
            difficulty: config.default_difficulty,
            direction: Direction::TranslationToWord,
            hint_enabled: false,
            scoring: defaults.scoring,
            focused: SetupField::PlayerName,
            error: None,
        }
    }

    pub fn uses_difficulty(&self) -> bool {
        self.game == GameKind::Vocabulary
    }

    pub fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::new(self.game, self.player_name.clone(), self.word_count)
            .with_scoring(self.scoring);
        if self.uses_difficulty() {
            config
                .with_difficulty(self.difficulty)
                .with_direction(self.direction)
                .with_hint(self.hint_enabled)
        } else {
            config
        }
    }

    fn visible_fields(&self) -> Vec<SetupField> {
        SetupField::ALL
            .into_iter()
            .filter(|f| {
                self.uses_difficulty()
                    || !matches!(
                        f,
                        SetupField::Difficulty | SetupField::Direction | SetupField::Hint
                    )
            })
            .collect()
    }

    fn focus_next(&mut self, forward: bool) {
        let visible = self.visible_fields();
        let mut field = self.focused;
        loop {
            field = if forward { field.next() } else { field.previous() };
            if visible.contains(&field) {
                break;
            }
        }
        self.focused = field;
    }

    fn adjust(&mut self, up: bool) {
        match self.focused {
            SetupField::PlayerName => {}
            SetupField::WordCount => {
                self.word_count = if up {
                    (self.word_count + 1).min(MAX_WORD_COUNT)
                } else {
                    self.word_count.saturating_sub(1).max(1)
                };
            }
            SetupField::Difficulty => {
                self.difficulty = if up {
                    (self.difficulty + 1).min(MAX_DIFFICULTY)
                } else {
                    self.difficulty.saturating_sub(1).max(MIN_DIFFICULTY)
                };
            }
            SetupField::Direction => self.direction = self.direction.toggled(),
            SetupField::Hint => self.hint_enabled = !self.hint_enabled,
            SetupField::Scoring => self.scoring = self.scoring.toggled(),
        }
    }
}

/// Scores screen data and the game filter applied to it.
#[derive(Debug, Default)]
pub struct StatisticsView {
    pub records: Vec<ScoreRecord>,
    pub filter: Option<GameKind>,
    pub loading: bool,
    pub error: Option<String>,
}

impl StatisticsView {
    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(GameKind::Articles),
            Some(GameKind::Articles) => Some(GameKind::Vocabulary),
            Some(GameKind::Vocabulary) => None,
        };
    }
}

pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    pub selected_home_index: usize,
    pub setup: SetupForm,
    pub quiz: Option<QuizSession>,
    pub statistics: StatisticsView,
    pub history: Vec<SessionSummary>,
    pub personal_best: Option<i64>,
    pub should_quit: bool,
    pending_session: Option<SessionConfig>,
    pending_words: Option<u64>,
    pending_scores: Option<u64>,
    next_request_id: u64,
    requests: Sender<ApiRequest>,
    db: Option<Connection>,
    rng: StdRng,
}

impl App {
    pub fn new(config: AppConfig, db: Option<Connection>, requests: Sender<ApiRequest>) -> Self {
        let player_name = db
            .as_ref()
            .and_then(|conn| match db::settings::load_player_name(conn) {
                Ok(name) => name,
                Err(e) => {
                    logger::log(&format!("Failed to load player name: {}", e));
                    None
                }
            })
            .unwrap_or_default();

        let setup = SetupForm::new(GameKind::Articles, player_name, &config);
        let mut app = Self {
            state: AppState::Home,
            config,
            selected_home_index: 0,
            setup,
            quiz: None,
            statistics: StatisticsView::default(),
            history: Vec::new(),
            personal_best: None,
            should_quit: false,
            pending_session: None,
            pending_words: None,
            pending_scores: None,
            next_request_id: 0,
            requests,
            db,
            rng: StdRng::from_entropy(),
        };
        app.reload_history();
        app
    }

    #[cfg(test)]
    pub(crate) fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn next_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    fn send(&self, request: ApiRequest) {
        if self.requests.send(request).is_err() {
            logger::log("API worker is gone, request dropped");
        }
    }

    fn reload_history(&mut self) {
        if let Some(conn) = &self.db {
            match db::history::list_recent(conn, HISTORY_LIMIT) {
                Ok(history) => self.history = history,
                Err(e) => logger::log(&format!("Failed to load history: {}", e)),
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Setup => self.handle_setup_key(key),
            AppState::Loading => {
                if key.code == KeyCode::Esc {
                    self.pending_words = None;
                    self.pending_session = None;
                    self.state = AppState::Setup;
                }
            }
            AppState::Quiz => {
                if let Some(quiz) = &mut self.quiz {
                    let effects = handle_quiz_input(quiz, key, &mut self.state);
                    self.forward_effects(effects);
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') => {
                    logger::log("Quiz abandoned by player");
                    self.quiz = None;
                    self.state = AppState::Home;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state = AppState::Quiz,
                _ => {}
            },
            AppState::Summary => match key.code {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('m') => {
                    self.quiz = None;
                    self.state = AppState::Home;
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            AppState::Statistics => match key.code {
                KeyCode::Char('r') => self.request_scores(),
                KeyCode::Char('g') => self.statistics.cycle_filter(),
                KeyCode::Esc | KeyCode::Char('m') => self.state = AppState::Home,
                _ => {}
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_home_index = self.selected_home_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_home_index < HOME_ENTRIES.len() - 1 {
                    self.selected_home_index += 1;
                }
            }
            KeyCode::Enter => match HOME_ENTRIES[self.selected_home_index] {
                HomeEntry::Play(game) => self.open_setup(game),
                HomeEntry::Statistics => {
                    self.state = AppState::Statistics;
                    self.request_scores();
                }
                HomeEntry::Quit => self.should_quit = true,
            },
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn open_setup(&mut self, game: GameKind) {
        let name = self.setup.player_name.clone();
        self.setup = SetupForm::new(game, name, &self.config);
        self.state = AppState::Setup;
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Home;
                return;
            }
            KeyCode::Enter => {
                self.begin_quiz();
                return;
            }
            _ => {}
        }

        let form = &mut self.setup;
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(true),
            KeyCode::BackTab | KeyCode::Up => form.focus_next(false),
            KeyCode::Left => form.adjust(false),
            KeyCode::Right => form.adjust(true),
            KeyCode::Backspace if form.focused == SetupField::PlayerName => {
                form.player_name.pop();
                form.error = None;
            }
            KeyCode::Char(' ') if form.focused != SetupField::PlayerName => form.adjust(true),
            KeyCode::Char(c) if form.focused == SetupField::PlayerName => {
                form.player_name.push(c);
                form.error = None;
            }
            _ => {}
        }
    }

    /// Validates the form and asks the worker for words.
    pub fn begin_quiz(&mut self) {
        let config = self.setup.session_config();
        if let Err(e) = config.validate() {
            self.setup.error = Some(e.to_string());
            return;
        }
        self.setup.error = None;

        if let Some(conn) = &self.db
            && let Err(e) = db::settings::save_player_name(conn, &config.player_name)
        {
            logger::log(&format!("Failed to save player name: {}", e));
        }

        self.request_words(config);
    }

    fn request_words(&mut self, config: SessionConfig) {
        let request_id = self.next_id();
        logger::log(&format!(
            "Requesting {} words for {} (request {})",
            config.word_count, config.game, request_id
        ));
        self.send(ApiRequest::FetchWords {
            request_id,
            game: config.game,
            difficulty: config.difficulty,
        });
        self.pending_words = Some(request_id);
        self.pending_session = Some(config);
        self.state = AppState::Loading;
    }

    fn request_scores(&mut self) {
        let request_id = self.next_id();
        self.send(ApiRequest::FetchScores { request_id });
        self.pending_scores = Some(request_id);
        self.statistics.loading = true;
        self.statistics.error = None;
    }

    /// Plays again with the same settings and fresh words.
    pub fn restart(&mut self) {
        if let Some(quiz) = self.quiz.take() {
            self.request_words(quiz.state.config);
        }
    }

    pub fn handle_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Words { request_id, result } => {
                if self.pending_words != Some(request_id) {
                    logger::log(&format!("Ignoring stale word response {}", request_id));
                    return;
                }
                self.pending_words = None;
                let Some(config) = self.pending_session.take() else {
                    return;
                };

                let (words, fetch_error) = match result {
                    Ok(words) => (words, None),
                    Err(e) => (Vec::new(), Some(e)),
                };

                match start_session(config, words, &mut self.rng) {
                    Ok(state) => {
                        self.personal_best = self.db.as_ref().and_then(|conn| {
                            db::history::personal_best(
                                conn,
                                &state.config.player_name,
                                state.config.game,
                            )
                            .ok()
                            .flatten()
                        });
                        let mut quiz = QuizSession::new(state);
                        quiz.fetch_error = fetch_error;
                        self.state = if quiz.state.completed {
                            AppState::Summary
                        } else {
                            AppState::Quiz
                        };
                        self.quiz = Some(quiz);
                    }
                    Err(e) => {
                        self.setup.error = Some(e.to_string());
                        self.state = AppState::Setup;
                    }
                }
            }
            ApiResponse::Scores { request_id, result } => {
                if self.pending_scores != Some(request_id) {
                    return;
                }
                self.pending_scores = None;
                self.statistics.loading = false;
                match result {
                    Ok(records) => {
                        self.statistics.records = records;
                        self.statistics.error = None;
                    }
                    Err(e) => self.statistics.error = Some(e),
                }
            }
            ApiResponse::EffectsDelivered { delivered, failed } => {
                if failed > 0 {
                    logger::log(&format!(
                        "{} of {} API updates failed",
                        failed,
                        delivered + failed
                    ));
                }
            }
        }
    }

    /// Hands engine effects to the worker and keeps a local copy of the final
    /// score.
    pub fn forward_effects(&mut self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        if effects.iter().any(Effect::is_score_submission) {
            self.record_finished_session();
        }
        self.send(ApiRequest::Dispatch(effects));
    }

    fn record_finished_session(&mut self) {
        let (Some(conn), Some(quiz)) = (&self.db, &self.quiz) else {
            return;
        };
        let state = &quiz.state;
        let record = NewSessionRecord {
            player_name: state.config.player_name.clone(),
            game: state.config.game,
            score: state.points,
            questions_total: state.len(),
            correct_answers: state.correct_count(),
            difficulty: state.config.difficulty,
        };
        if let Err(e) = db::history::record_session(conn, &record) {
            logger::log(&format!("Failed to record session: {}", e));
        }
        self.reload_history();
    }
}
