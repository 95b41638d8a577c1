pub mod api;
pub mod api_worker;
pub mod app;
pub mod config;
pub mod db;
pub mod engine;
pub mod logger;
pub mod models;
pub mod session;
pub mod stats;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use api::{ApiClient, ApiError};
pub use app::App;
pub use config::AppConfig;
pub use engine::{
    start_session, AnswerMode, Direction, Effect, ScoringPolicy, SessionConfig, SessionState,
    StartError, Step,
};
pub use models::{Answer, AppState, Article, ArticleChoice, GameKind, ScoreRecord, WordEntry};
pub use session::{handle_quiz_input, QuizSession};
