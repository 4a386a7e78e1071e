//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use news_veracity::classifier::{ArticleClassifier, ClassifierError};
use news_veracity::crawlers::{ArticleScraper, CrawlerError, CrawlerResult, HeadlineSource};
use news_veracity::db::{DbPool, establish_connection_pool};
use news_veracity::domain::article::NewArticle;
use news_veracity::domain::headline::NewHeadline;
use news_veracity::domain::prediction::Prediction;
use news_veracity::repository::{ArticleWriter, DieselRepository, PredictionWriter};
use tempfile::TempDir;

/// Temporary database used in integration tests.
///
/// The file lives in its own temporary directory, removed together with the
/// WAL side files when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);

        let pool = establish_connection_pool(&path.to_string_lossy())
            .expect("Failed to establish SQLite connection.");
        TestDb {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn new_article(url: &str, title: &str) -> NewArticle {
    NewArticle {
        url: url.to_string(),
        title: title.to_string(),
        content: "본문".to_string(),
    }
}

pub fn prediction(real: f64) -> Prediction {
    Prediction {
        real_news_probability: real,
        fake_news_probability: 1.0 - real,
    }
}

/// Stores an article together with its prediction.
pub fn insert_analyzed(repo: &DieselRepository, url: &str, title: &str, real: f64) -> i32 {
    let id = repo
        .save_article(&new_article(url, title))
        .expect("article stored");
    repo.save_prediction(id, &prediction(real))
        .expect("prediction stored");
    id
}

/// Serves fixed pages; unknown URLs fail like a 404.
pub struct StaticScraper {
    pub pages: Vec<NewArticle>,
}

#[async_trait]
impl ArticleScraper for StaticScraper {
    async fn fetch_article(&self, url: &str) -> CrawlerResult<NewArticle> {
        self.pages
            .iter()
            .find(|page| page.url == url)
            .cloned()
            .ok_or_else(|| CrawlerError::Request {
                url: url.to_string(),
                message: "404 Not Found".to_string(),
            })
    }
}

pub struct StaticHeadlines {
    pub headlines: Vec<NewHeadline>,
}

#[async_trait]
impl HeadlineSource for StaticHeadlines {
    async fn fetch_headlines(&self) -> CrawlerResult<Vec<NewHeadline>> {
        Ok(self.headlines.clone())
    }
}

pub struct FixedClassifier {
    pub result: Result<f64, ()>,
}

#[async_trait]
impl ArticleClassifier for FixedClassifier {
    async fn classify(&self, _url: &str) -> Result<Prediction, ClassifierError> {
        self.result
            .map(prediction)
            .map_err(|()| ClassifierError::Unavailable("model missing".to_string()))
    }
}
