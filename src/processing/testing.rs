//! In-memory collaborators for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::classifier::{ArticleClassifier, ClassifierError};
use crate::crawlers::{ArticleScraper, CrawlerError, CrawlerResult, HeadlineSource};
use crate::domain::article::{Article, NewArticle};
use crate::domain::candidate::Candidate;
use crate::domain::headline::{Headline, NewHeadline};
use crate::domain::prediction::{ArticlePrediction, Prediction};
use crate::repository::errors::{CorpusError, RepositoryError, RepositoryResult};
use crate::repository::{
    ArticleReader, ArticleWriter, CorpusProvider, HeadlineReader, HeadlineWriter,
    PredictionReader, PredictionWriter,
};

#[derive(Default)]
struct RepoState {
    articles: Vec<Article>,
    predictions: HashMap<i32, Prediction>,
    headlines: Vec<(NewHeadline, NaiveDateTime)>,
    corpus_fails: bool,
}

#[derive(Default)]
pub struct FakeRepo {
    state: Mutex<RepoState>,
}

impl FakeRepo {
    pub fn insert_analyzed(&self, title: &str, url: &str, real: f64) {
        let id = self
            .save_article(&NewArticle {
                url: url.to_string(),
                title: title.to_string(),
                content: "본문".to_string(),
            })
            .expect("fake insert");
        self.save_prediction(id, &prediction(real))
            .expect("fake insert");
    }

    pub fn fail_corpus(&self) {
        self.state.lock().expect("state mutex poisoned").corpus_fails = true;
    }

    pub fn article_stored(&self, url: &str) -> bool {
        let state = self.state.lock().expect("state mutex poisoned");
        state.articles.iter().any(|a| a.url == url)
    }

    pub fn prediction_count(&self) -> usize {
        self.state.lock().expect("state mutex poisoned").predictions.len()
    }

    pub fn headline_urls(&self) -> Vec<String> {
        let state = self.state.lock().expect("state mutex poisoned");
        state.headlines.iter().map(|(h, _)| h.url.clone()).collect()
    }
}

pub fn prediction(real: f64) -> Prediction {
    Prediction {
        real_news_probability: real,
        fake_news_probability: 1.0 - real,
    }
}

impl ArticleReader for FakeRepo {
    fn get_article_by_url(&self, url: &str) -> RepositoryResult<Option<Article>> {
        let state = self.state.lock().expect("state mutex poisoned");
        Ok(state.articles.iter().find(|a| a.url == url).cloned())
    }
}

impl ArticleWriter for FakeRepo {
    fn save_article(&self, article: &NewArticle) -> RepositoryResult<i32> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if let Some(existing) = state.articles.iter().find(|a| a.url == article.url) {
            return Ok(existing.id);
        }
        let id = state.articles.len() as i32 + 1;
        state.articles.push(Article {
            id,
            url: article.url.clone(),
            title: article.title.clone(),
            content: article.content.clone(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }
}

impl PredictionReader for FakeRepo {
    fn get_prediction_by_url(&self, url: &str) -> RepositoryResult<Option<ArticlePrediction>> {
        let state = self.state.lock().expect("state mutex poisoned");
        Ok(state
            .articles
            .iter()
            .find(|a| a.url == url)
            .and_then(|a| {
                state.predictions.get(&a.id).map(|p| ArticlePrediction {
                    title: a.title.clone(),
                    prediction: *p,
                })
            }))
    }
}

impl PredictionWriter for FakeRepo {
    fn save_prediction(&self, article_id: i32, prediction: &Prediction) -> RepositoryResult<bool> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.predictions.contains_key(&article_id) {
            return Ok(false);
        }
        state.predictions.insert(article_id, *prediction);
        Ok(true)
    }
}

impl HeadlineReader for FakeRepo {
    fn list_recent_headlines(&self, since: NaiveDateTime) -> RepositoryResult<Vec<Headline>> {
        let state = self.state.lock().expect("state mutex poisoned");
        let mut result: Vec<Headline> = state
            .headlines
            .iter()
            .filter(|(_, created_at)| *created_at >= since)
            .filter_map(|(headline, created_at)| {
                let article = state.articles.iter().find(|a| a.url == headline.url)?;
                let prediction = state.predictions.get(&article.id)?;
                Some(Headline {
                    press_name: headline.press_name.clone(),
                    url: headline.url.clone(),
                    title: article.title.clone(),
                    real_news_probability: prediction.real_news_probability,
                    fake_news_probability: prediction.fake_news_probability,
                    created_at: *created_at,
                })
            })
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

impl HeadlineWriter for FakeRepo {
    fn save_headline(&self, headline: &NewHeadline) -> RepositoryResult<usize> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        let now = Utc::now().naive_utc();
        if let Some(entry) = state
            .headlines
            .iter_mut()
            .find(|(h, _)| h.press_name == headline.press_name && h.url == headline.url)
        {
            entry.1 = now;
        } else {
            state.headlines.push((headline.clone(), now));
        }
        Ok(1)
    }
}

impl CorpusProvider for FakeRepo {
    fn fetch_all_titles(&self) -> Result<Vec<Candidate>, CorpusError> {
        let state = self.state.lock().expect("state mutex poisoned");
        if state.corpus_fails {
            return Err(CorpusError::StoreUnavailable(RepositoryError::Unexpected(
                "injected corpus failure".to_string(),
            )));
        }
        Ok(state
            .articles
            .iter()
            .filter_map(|a| {
                let p = state.predictions.get(&a.id)?;
                Some(Candidate::new(
                    a.title.clone(),
                    a.url.clone(),
                    p.real_news_probability,
                ))
            })
            .collect())
    }
}

/// Scraper that titles every page with a fixed title, or with a per-URL one.
pub struct FakeScraper {
    title: String,
    titles: HashMap<String, (String, String)>,
    pub calls: AtomicUsize,
}

impl FakeScraper {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            titles: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Pages listed here get the given title and content; other URLs fail.
    pub fn pages(pages: &[(&str, &str, &str)]) -> Self {
        Self {
            title: String::new(),
            titles: pages
                .iter()
                .map(|(url, title, content)| {
                    (url.to_string(), (title.to_string(), content.to_string()))
                })
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ArticleScraper for FakeScraper {
    async fn fetch_article(&self, url: &str) -> CrawlerResult<NewArticle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.titles.is_empty() {
            return Ok(NewArticle {
                url: url.to_string(),
                title: self.title.clone(),
                content: "본문".to_string(),
            });
        }
        match self.titles.get(url) {
            Some((title, content)) => Ok(NewArticle {
                url: url.to_string(),
                title: title.clone(),
                content: content.clone(),
            }),
            None => Err(CrawlerError::Request {
                url: url.to_string(),
                message: "404 Not Found".to_string(),
            }),
        }
    }
}

pub struct FakeClassifier {
    result: Option<f64>,
    pub calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn returning(real: f64) -> Self {
        Self {
            result: Some(real),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ArticleClassifier for FakeClassifier {
    async fn classify(&self, _url: &str) -> Result<Prediction, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .map(prediction)
            .ok_or_else(|| ClassifierError::Unavailable("injected failure".to_string()))
    }
}

pub struct FakeHeadlineSource {
    headlines: Option<Vec<NewHeadline>>,
}

impl FakeHeadlineSource {
    pub fn with(headlines: &[(&str, &str)]) -> Self {
        Self {
            headlines: Some(
                headlines
                    .iter()
                    .map(|(press_name, url)| NewHeadline {
                        press_name: press_name.to_string(),
                        title: String::new(),
                        url: url.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn failing() -> Self {
        Self { headlines: None }
    }
}

#[async_trait]
impl HeadlineSource for FakeHeadlineSource {
    async fn fetch_headlines(&self) -> CrawlerResult<Vec<NewHeadline>> {
        self.headlines.clone().ok_or_else(|| CrawlerError::Request {
            url: "ranking".to_string(),
            message: "injected failure".to_string(),
        })
    }
}
