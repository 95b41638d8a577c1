use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_WORD_COUNT: usize = 5;
pub const DEFAULT_DIFFICULTY: u8 = 1;
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_FILE: &str = "wortquiz.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub default_word_count: usize,
    pub default_difficulty: u8,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_word_count: DEFAULT_WORD_COUNT,
            default_difficulty: DEFAULT_DIFFICULTY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            db_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get("WORTQUIZ_API_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("WORTQUIZ_API_URL must be an http(s) URL, got `{}`", url));
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(count) = get("WORTQUIZ_WORD_COUNT") {
            let count: usize = count
                .parse()
                .map_err(|e| format!("Invalid WORTQUIZ_WORD_COUNT `{}`: {}", count, e))?;
            if count == 0 {
                return Err("WORTQUIZ_WORD_COUNT must be at least 1".to_string());
            }
            config.default_word_count = count;
        }

        if let Some(level) = get("WORTQUIZ_DIFFICULTY") {
            let level: u8 = level
                .parse()
                .map_err(|e| format!("Invalid WORTQUIZ_DIFFICULTY `{}`: {}", level, e))?;
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
                return Err(format!(
                    "WORTQUIZ_DIFFICULTY must be between {} and {}",
                    MIN_DIFFICULTY, MAX_DIFFICULTY
                ));
            }
            config.default_difficulty = level;
        }

        if let Some(secs) = get("WORTQUIZ_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| format!("Invalid WORTQUIZ_TIMEOUT_SECS `{}`: {}", secs, e))?;
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(path) = get("WORTQUIZ_LOG") {
            config.log_file = PathBuf::from(path);
        }

        config.db_path = get("WORTQUIZ_DB").map(PathBuf::from);

        Ok(config)
    }
}
