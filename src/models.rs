use crate::engine::Effect;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker the word bank stores in `translation` for plural "die" nouns.
pub const PLURAL_MARKER: &str = "plural";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    pub const ALL: [Article; 3] = [Article::Der, Article::Die, Article::Das];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "der" => Some(Article::Der),
            "die" => Some(Article::Die),
            "das" => Some(Article::Das),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four buttons of the article game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleChoice {
    Der,
    Die,
    Das,
    DiePlural,
}

impl ArticleChoice {
    pub const ALL: [ArticleChoice; 4] = [
        ArticleChoice::Der,
        ArticleChoice::Die,
        ArticleChoice::Das,
        ArticleChoice::DiePlural,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArticleChoice::Der => "der",
            ArticleChoice::Die => "die",
            ArticleChoice::Das => "das",
            ArticleChoice::DiePlural => "die (plural)",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "die (plural)" | "die_plural" | "die plural" => Some(ArticleChoice::DiePlural),
            other => Article::parse(other).map(ArticleChoice::from),
        }
    }

    /// Maps the number keys 1-4 of the quiz screen.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(ArticleChoice::Der),
            '2' => Some(ArticleChoice::Die),
            '3' => Some(ArticleChoice::Das),
            '4' => Some(ArticleChoice::DiePlural),
            _ => None,
        }
    }
}

impl From<Article> for ArticleChoice {
    fn from(article: Article) -> Self {
        match article {
            Article::Der => ArticleChoice::Der,
            Article::Die => ArticleChoice::Die,
            Article::Das => ArticleChoice::Das,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Article(ArticleChoice),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Articles,
    Vocabulary,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Articles, GameKind::Vocabulary];

    /// Tag sent as the `game` field of score submissions.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Articles => "articles",
            GameKind::Vocabulary => "vocabulary",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "articles" | "article" => Some(GameKind::Articles),
            "vocabulary" => Some(GameKind::Vocabulary),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Articles => "Articles Game",
            GameKind::Vocabulary => "Vocabulary Game",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quiz prompt as served by the word bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default, deserialize_with = "deserialize_article")]
    pub article: Option<Article>,
    #[serde(default)]
    pub translation: String,
    #[serde(default, alias = "successRate")]
    pub success_rate: f64,
}

impl WordEntry {
    pub fn is_plural(&self) -> bool {
        self.article == Some(Article::Die) && self.translation == PLURAL_MARKER
    }
}

fn deserialize_article<'de, D>(deserializer: D) -> Result<Option<Article>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Article::parse(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown article `{}`", value))),
    }
}

/// One row of the remote score list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(alias = "player")]
    pub player_name: String,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid score `{}`: {}", s, e))),
    }
}

#[derive(Debug)]
pub enum ApiRequest {
    FetchWords {
        request_id: u64,
        game: GameKind,
        difficulty: Option<u8>,
    },
    Dispatch(Vec<Effect>),
    FetchScores {
        request_id: u64,
    },
}

#[derive(Debug)]
pub enum ApiResponse {
    Words {
        request_id: u64,
        result: Result<Vec<WordEntry>, String>,
    },
    Scores {
        request_id: u64,
        result: Result<Vec<ScoreRecord>, String>,
    },
    EffectsDelivered {
        delivered: usize,
        failed: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Home,
    Setup,
    Loading,
    Quiz,
    QuizQuitConfirm,
    Summary,
    Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_from_api_json() {
        let json = r#"{"word":"Haus","article":"das","translation":"house","success_rate":42.5}"#;
        let entry: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.word, "Haus");
        assert_eq!(entry.article, Some(Article::Das));
        assert_eq!(entry.translation, "house");
        assert_eq!(entry.success_rate, 42.5);
    }

    #[test]
    fn test_vocabulary_entry_without_article() {
        let json = r#"{"word":"der Hund","translation":"dog","article":""}"#;
        let entry: WordEntry = serde_json::from_str(json).unwrap();
        assert!(entry.article.is_none());
        assert_eq!(entry.success_rate, 0.0);
    }

    #[test]
    fn test_camel_case_success_rate_alias() {
        let json = r#"{"word":"Tisch","article":"Der","translation":"table","successRate":10}"#;
        let entry: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.article, Some(Article::Der));
        assert_eq!(entry.success_rate, 10.0);
    }

    #[test]
    fn test_unknown_article_is_rejected() {
        let json = r#"{"word":"Tisch","article":"den","translation":"table"}"#;
        assert!(serde_json::from_str::<WordEntry>(json).is_err());
    }

    #[test]
    fn test_plural_detection() {
        let plural = WordEntry {
            word: "Kinder".to_string(),
            article: Some(Article::Die),
            translation: PLURAL_MARKER.to_string(),
            success_rate: 0.0,
        };
        let singular = WordEntry {
            translation: "children".to_string(),
            ..plural.clone()
        };
        assert!(plural.is_plural());
        assert!(!singular.is_plural());
    }

    #[test]
    fn test_score_record_accepts_string_scores() {
        let json = r#"[{"player_name":"Anna","score":"7.50"},{"player":"Ben","game":"articles","score":12}]"#;
        let records: Vec<ScoreRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].player_name, "Anna");
        assert_eq!(records[0].score, 7.5);
        assert_eq!(records[1].player_name, "Ben");
        assert_eq!(records[1].game.as_deref(), Some("articles"));
        assert_eq!(records[1].score, 12.0);
    }

    #[test]
    fn test_article_choice_parsing() {
        assert_eq!(ArticleChoice::parse(" DIE "), Some(ArticleChoice::Die));
        assert_eq!(
            ArticleChoice::parse("die (Plural)"),
            Some(ArticleChoice::DiePlural)
        );
        assert_eq!(ArticleChoice::parse("die_plural"), Some(ArticleChoice::DiePlural));
        assert_eq!(ArticleChoice::parse("dem"), None);
        assert_eq!(ArticleChoice::from_key('3'), Some(ArticleChoice::Das));
        assert_eq!(ArticleChoice::from_key('5'), None);
    }

    #[test]
    fn test_game_kind_tags() {
        assert_eq!(GameKind::Articles.as_str(), "articles");
        assert_eq!(
            serde_json::to_string(&GameKind::Vocabulary).unwrap(),
            "\"vocabulary\""
        );
        assert_eq!(GameKind::parse("Vocabulary"), Some(GameKind::Vocabulary));
    }
}
