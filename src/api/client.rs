use super::{ApiError, ScoreBoard, ScoreReporter, TrackingReporter, WordProvider};
use crate::config::AppConfig;
use crate::engine::{ScoreSubmission, TrackingEvent};
use crate::logger;
use crate::models::{GameKind, ScoreRecord, WordEntry};
use async_trait::async_trait;
use serde::Serialize;

pub const WORDS_PATH: &str = "/words-with-rates";
pub const VOCABULARY_PATH: &str = "/vocabulary";
pub const SCORES_PATH: &str = "/scores";
pub const SUBMIT_SCORE_PATH: &str = "/scores/submit";
pub const TRACKING_PATH: &str = "/update-tracking";

/// HTTP client for the word bank and scoring API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        if config.api_url.trim().is_empty() {
            return Err(ApiError::Config("API URL is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the word list for a game.
    pub fn words_url(&self, game: GameKind, difficulty: Option<u8>) -> String {
        let path = match game {
            GameKind::Articles => WORDS_PATH,
            GameKind::Vocabulary => VOCABULARY_PATH,
        };
        match difficulty {
            Some(level) => format!("{}{}?difficulty={}", self.base_url, path, level),
            None => format!("{}{}", self.base_url, path),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<String, ApiError> {
        let url = self.endpoint(path);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: url,
                status: status.as_u16(),
            });
        }
        Ok(text)
    }
}

pub fn parse_words(body: &str) -> Result<Vec<WordEntry>, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Decodes the score list row by row. Rows with a missing or non-numeric
/// score are logged and skipped so one bad entry cannot hide the rest.
pub fn parse_scores(body: &str) -> Result<Vec<ScoreRecord>, ApiError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<ScoreRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => logger::log(&format!("Skipping score row: {}", e)),
        }
    }
    Ok(records)
}

#[async_trait]
impl WordProvider for ApiClient {
    async fn fetch_words(
        &self,
        game: GameKind,
        difficulty: Option<u8>,
    ) -> Result<Vec<WordEntry>, ApiError> {
        let url = self.words_url(game, difficulty);
        logger::log(&format!("Fetching words from {}", url));
        let body = self.get_text(&url).await?;
        let words = parse_words(&body)?;
        logger::log(&format!("Received {} words", words.len()));
        Ok(words)
    }
}

#[async_trait]
impl ScoreReporter for ApiClient {
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
        let body = self.post_json(SUBMIT_SCORE_PATH, submission).await?;
        logger::log(&format!("Result submitted successfully: {}", body));
        Ok(())
    }
}

#[async_trait]
impl TrackingReporter for ApiClient {
    async fn track_answer(&self, event: &TrackingEvent) -> Result<(), ApiError> {
        self.post_json(TRACKING_PATH, event).await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreBoard for ApiClient {
    async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ApiError> {
        let body = self.get_text(&self.endpoint(SCORES_PATH)).await?;
        parse_scores(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn client(url: &str) -> ApiClient {
        let config = AppConfig {
            api_url: url.to_string(),
            ..AppConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_words_url_per_game() {
        let client = client("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.words_url(GameKind::Articles, None),
            "http://localhost:5000/words-with-rates"
        );
        assert_eq!(
            client.words_url(GameKind::Vocabulary, Some(3)),
            "http://localhost:5000/vocabulary?difficulty=3"
        );
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let config = AppConfig {
            api_url: " ".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_parse_words() {
        let body = r#"[
            {"word":"Haus","article":"das","translation":"house","success_rate":80.0},
            {"word":"Kinder","article":"die","translation":"plural","success_rate":12.5}
        ]"#;
        let words = parse_words(body).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].article, Some(Article::Das));
        assert!(words[1].is_plural());
    }

    #[test]
    fn test_parse_words_rejects_garbage() {
        assert!(matches!(parse_words("<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_parse_scores() {
        let body = r#"[{"player_name":"Anna","game":"vocabulary","score":"8.00"}]"#;
        let scores = parse_scores(body).unwrap();
        assert_eq!(scores[0].score, 8.0);
    }

    #[test]
    fn test_parse_scores_skips_bad_rows() {
        let body = r#"[
            {"player_name":"Anna","score":"8.00"},
            {"player_name":"Ben","score":null},
            {"player_name":"Cleo","score":"N/A"},
            {"score":4},
            {"player":"Dora","game":"articles","score":12}
        ]"#;
        let scores = parse_scores(body).unwrap();
        let players: Vec<&str> = scores.iter().map(|s| s.player_name.as_str()).collect();
        assert_eq!(players, vec!["Anna", "Dora"]);
        assert_eq!(scores[1].score, 12.0);
    }

    #[test]
    fn test_parse_scores_rejects_non_array() {
        assert!(matches!(
            parse_scores(r#"{"error":"down"}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let client = client("http://127.0.0.1:9");
        let result = client.fetch_words(GameKind::Articles, None).await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
