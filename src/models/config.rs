//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::ranking::{RankWindow, RankingError};

/// Environment variables with this prefix override file values, e.g.
/// `APP_DATABASE_URL` or `APP_CLASSIFIER__TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "APP";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: String,
    pub zmq_address: String,
    pub classifier: ClassifierConfig,
    pub similar: SimilarConfig,
    pub headlines: HeadlinesConfig,
    pub scraper: ScraperConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "app.db".to_string(),
            bind_address: "0.0.0.0:60027".to_string(),
            zmq_address: "tcp://127.0.0.1:5555".to_string(),
            classifier: ClassifierConfig::default(),
            similar: SimilarConfig::default(),
            headlines: HeadlinesConfig::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `path` (any extension the `config` crate understands, optional)
    /// and then applies environment overrides.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Interpreter or executable to launch.
    pub program: String,
    /// Arguments placed before the article URL, usually the model script.
    pub args: Vec<String>,
    pub timeout_secs: u64,
    /// Number of classifier processes allowed to run at once.
    pub max_concurrent: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["AI/model_predict.py".to_string()],
            timeout_secs: 120,
            max_concurrent: 1,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimilarConfig {
    pub window_start: usize,
    pub window_end: usize,
}

impl Default for SimilarConfig {
    fn default() -> Self {
        let window = RankWindow::default();
        Self {
            window_start: window.start(),
            window_end: window.end(),
        }
    }
}

impl SimilarConfig {
    pub fn window(&self) -> Result<RankWindow, RankingError> {
        RankWindow::new(self.window_start, self.window_end)
    }
}

/// Longest accepted `headlines.recent_window_minutes`, one year.
pub const MAX_RECENT_WINDOW_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeadlinesConfigError {
    #[error("headlines.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error(
        "headlines.recent_window_minutes must be between 1 and {MAX_RECENT_WINDOW_MINUTES}, got {0}"
    )]
    RecentWindowOutOfRange(i64),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HeadlinesConfig {
    pub ranking_url: String,
    pub target_press: Vec<String>,
    pub per_press_limit: usize,
    pub interval_secs: u64,
    pub recent_window_minutes: i64,
}

impl Default for HeadlinesConfig {
    fn default() -> Self {
        Self {
            ranking_url: "https://news.naver.com/main/ranking/popularDay.naver".to_string(),
            target_press: ["JTBC", "KBS", "SBS", "국민일보", "아시아경제"]
                .into_iter()
                .map(String::from)
                .collect(),
            per_press_limit: 10,
            interval_secs: 3600,
            recent_window_minutes: 60,
        }
    }
}

impl HeadlinesConfig {
    /// Period of the scheduled refresh.
    pub fn interval(&self) -> Result<Duration, HeadlinesConfigError> {
        if self.interval_secs == 0 {
            return Err(HeadlinesConfigError::ZeroInterval);
        }
        Ok(Duration::from_secs(self.interval_secs))
    }

    /// How far back `GET /api/headlines` looks, in minutes.
    pub fn recent_window(&self) -> Result<i64, HeadlinesConfigError> {
        if (1..=MAX_RECENT_WINDOW_MINUTES).contains(&self.recent_window_minutes) {
            Ok(self.recent_window_minutes)
        } else {
            Err(HeadlinesConfigError::RecentWindowOutOfRange(
                self.recent_window_minutes,
            ))
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}
