use crate::engine::{AnswerMode, Effect, SessionState, Step};
use crate::models::{Answer, AppState, ArticleChoice};
use crate::utils::byte_index;
use crossterm::event::{KeyCode, KeyEvent};

/// A running quiz as the terminal front-end sees it: the engine state plus
/// the text the player is typing.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub state: SessionState,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub fetch_error: Option<String>,
}

impl QuizSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            input_buffer: String::new(),
            cursor_position: 0,
            fetch_error: None,
        }
    }

    fn apply(&mut self, transition: impl FnOnce(SessionState) -> Step) -> Vec<Effect> {
        let step = transition(self.state.clone());
        self.state = step.state;
        step.effects
    }

    pub fn submit(&mut self, answer: Answer) -> Vec<Effect> {
        self.apply(|state| state.submit_answer(&answer))
    }

    pub fn advance(&mut self) -> Vec<Effect> {
        let effects = self.apply(SessionState::advance);
        if !self.state.answered {
            self.input_buffer.clear();
            self.cursor_position = 0;
        }
        effects
    }

    fn insert_char(&mut self, c: char) {
        let at = byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            let at = byte_index(&self.input_buffer, self.cursor_position - 1);
            self.input_buffer.remove(at);
            self.cursor_position -= 1;
        }
    }
}

/// Routes one key press on the quiz screen to the engine and returns the
/// effects of whatever transition it caused.
pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Vec<Effect> {
    if key.code == KeyCode::Esc {
        *app_state = AppState::QuizQuitConfirm;
        return Vec::new();
    }

    if session.state.completed {
        *app_state = AppState::Summary;
        return Vec::new();
    }

    if session.state.answered {
        if key.code != KeyCode::Enter {
            return Vec::new();
        }
        let effects = session.advance();
        if session.state.completed {
            *app_state = AppState::Summary;
        }
        return effects;
    }

    match session.state.config.answer_mode {
        AnswerMode::Article => match key.code {
            KeyCode::Char(c) => match ArticleChoice::from_key(c) {
                Some(choice) => session.submit(Answer::Article(choice)),
                None => Vec::new(),
            },
            _ => Vec::new(),
        },
        AnswerMode::FreeText(_) => match key.code {
            KeyCode::Enter => {
                if session.input_buffer.trim().is_empty() {
                    return Vec::new();
                }
                let typed = session.input_buffer.clone();
                session.submit(Answer::Text(typed))
            }
            KeyCode::Left => {
                session.cursor_position = session.cursor_position.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Right => {
                let len = session.input_buffer.chars().count();
                session.cursor_position = (session.cursor_position + 1).min(len);
                Vec::new()
            }
            KeyCode::Backspace => {
                session.delete_before_cursor();
                Vec::new()
            }
            KeyCode::Char(c) => {
                session.insert_char(c);
                Vec::new()
            }
            _ => Vec::new(),
        },
    }
}
