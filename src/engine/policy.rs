use crate::models::{Answer, Article, ArticleChoice, WordEntry};

pub const STREAK_REWARD: i64 = 5;
pub const STREAK_PENALTY: i64 = 5;
pub const STREAK_BONUS: i64 = 10;
pub const STREAK_BONUS_EVERY: u32 = 5;

const HINT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// +1 per correct answer, wrong answers cost nothing.
    Simple,
    /// +5 / -5, with a +10 bonus every fifth correct answer in a row.
    Streak,
}

impl ScoringPolicy {
    /// Points gained or lost for one answer. `new_streak` is the streak after
    /// the answer has been counted.
    pub fn points_delta(&self, correct: bool, new_streak: u32) -> i64 {
        match (self, correct) {
            (ScoringPolicy::Simple, true) => 1,
            (ScoringPolicy::Simple, false) => 0,
            (ScoringPolicy::Streak, true) => {
                if new_streak > 0 && new_streak % STREAK_BONUS_EVERY == 0 {
                    STREAK_REWARD + STREAK_BONUS
                } else {
                    STREAK_REWARD
                }
            }
            (ScoringPolicy::Streak, false) => -STREAK_PENALTY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoringPolicy::Simple => "Simple (+1)",
            ScoringPolicy::Streak => "Streak (+5/-5, bonus)",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ScoringPolicy::Simple => ScoringPolicy::Streak,
            ScoringPolicy::Streak => ScoringPolicy::Simple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Show the English translation, expect the German word.
    TranslationToWord,
    /// Show the German word, expect the English translation.
    WordToTranslation,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::TranslationToWord => "English -> German",
            Direction::WordToTranslation => "German -> English",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Direction::TranslationToWord => Direction::WordToTranslation,
            Direction::WordToTranslation => Direction::TranslationToWord,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    Article,
    FreeText(Direction),
}

impl AnswerMode {
    pub fn is_correct(&self, entry: &WordEntry, answer: &Answer) -> bool {
        match (self, answer) {
            (AnswerMode::Article, Answer::Article(choice)) => article_matches(entry, *choice),
            (AnswerMode::Article, Answer::Text(text)) => ArticleChoice::parse(text)
                .map(|choice| article_matches(entry, choice))
                .unwrap_or(false),
            (AnswerMode::FreeText(direction), Answer::Article(choice)) => {
                text_matches(choice.label(), expected_text(entry, *direction))
            }
            (AnswerMode::FreeText(direction), Answer::Text(text)) => {
                text_matches(text, expected_text(entry, *direction))
            }
        }
    }

    /// What the player should have answered, for feedback and summaries.
    pub fn expected_answer(&self, entry: &WordEntry) -> String {
        match self {
            AnswerMode::Article => {
                if entry.is_plural() {
                    ArticleChoice::DiePlural.label().to_string()
                } else {
                    entry
                        .article
                        .map(|a| a.as_str().to_string())
                        .unwrap_or_default()
                }
            }
            AnswerMode::FreeText(direction) => expected_text(entry, *direction).to_string(),
        }
    }

    /// The text shown as the question.
    pub fn prompt<'a>(&self, entry: &'a WordEntry) -> &'a str {
        match self {
            AnswerMode::Article | AnswerMode::FreeText(Direction::WordToTranslation) => {
                &entry.word
            }
            AnswerMode::FreeText(Direction::TranslationToWord) => &entry.translation,
        }
    }
}

fn article_matches(entry: &WordEntry, choice: ArticleChoice) -> bool {
    match choice {
        ArticleChoice::DiePlural => entry.is_plural(),
        ArticleChoice::Die => entry.article == Some(Article::Die) && !entry.is_plural(),
        ArticleChoice::Der => entry.article == Some(Article::Der),
        ArticleChoice::Das => entry.article == Some(Article::Das),
    }
}

fn expected_text(entry: &WordEntry, direction: Direction) -> &str {
    match direction {
        Direction::TranslationToWord => &entry.word,
        Direction::WordToTranslation => &entry.translation,
    }
}

fn text_matches(given: &str, expected: &str) -> bool {
    let given = given.trim();
    !given.is_empty() && given.to_lowercase() == expected.trim().to_lowercase()
}

/// First letters of a German noun, skipping a leading article.
pub fn hint_for(word: &str) -> String {
    let mut parts = word.split_whitespace();
    let first = parts.next().unwrap_or_default();
    let noun = match parts.next() {
        Some(next) if Article::parse(first).is_some() => next,
        _ => word.trim(),
    };
    noun.chars().take(HINT_LEN).collect()
}
