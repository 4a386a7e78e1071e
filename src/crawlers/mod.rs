use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::Selector;
use thiserror::Error;

use crate::domain::article::NewArticle;
use crate::domain::headline::NewHeadline;
use crate::models::config::ScraperConfig;

pub mod naver;

static ARTICLE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://n\.news\.naver\.com/((mnews/)?(hotissue/)?article/)")
        .expect("article url pattern is valid")
});

/// Whether `url` points at a Naver news article page.
pub fn is_supported_article_url(url: &str) -> bool {
    ARTICLE_URL.is_match(url)
}

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("failed to build crawler: {0}")]
    Build(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to parse {url}: {message}")]
    Parse { url: String, message: String },
}

pub type CrawlerResult<T> = Result<T, CrawlerError>;

/// Builds the HTTP client shared by all requests of a crawler.
pub fn build_reqwest_client(config: &ScraperConfig) -> CrawlerResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| CrawlerError::Build(e.to_string()))
}

pub(crate) fn selector(css: &str) -> CrawlerResult<Selector> {
    Selector::parse(css).map_err(|e| CrawlerError::Build(format!("invalid selector {css}: {e}")))
}

/// Extracts the title and body of a single news article.
#[async_trait]
pub trait ArticleScraper: Send + Sync {
    async fn fetch_article(&self, url: &str) -> CrawlerResult<NewArticle>;
}

/// Lists the currently most viewed headlines.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self) -> CrawlerResult<Vec<NewHeadline>>;
}
