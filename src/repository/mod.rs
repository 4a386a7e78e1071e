use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::article::{Article, NewArticle};
use crate::domain::candidate::Candidate;
use crate::domain::headline::{Headline, NewHeadline};
use crate::domain::prediction::{ArticlePrediction, Prediction};
use crate::repository::errors::{CorpusError, RepositoryResult};

pub mod article;
pub mod corpus;
pub mod errors;
pub mod headline;
pub mod prediction;

/// Repository handle backed by a Diesel connection pool.
///
/// Each method checks out its own connection; the pooled guard hands it back
/// when the method returns, on success and on error alike.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait ArticleReader {
    fn get_article_by_url(&self, url: &str) -> RepositoryResult<Option<Article>>;
}

pub trait ArticleWriter {
    /// Stores `article` unless its URL is already known. Returns the row id.
    fn save_article(&self, article: &NewArticle) -> RepositoryResult<i32>;
}

pub trait PredictionReader {
    fn get_prediction_by_url(&self, url: &str) -> RepositoryResult<Option<ArticlePrediction>>;
}

pub trait PredictionWriter {
    /// Stores the prediction for `article_id`. Returns `false` when one
    /// already existed and nothing was written.
    fn save_prediction(&self, article_id: i32, prediction: &Prediction) -> RepositoryResult<bool>;
}

pub trait HeadlineReader {
    /// Headlines recorded at or after `since`, newest first, that have a
    /// stored article and prediction.
    fn list_recent_headlines(&self, since: NaiveDateTime) -> RepositoryResult<Vec<Headline>>;
}

pub trait HeadlineWriter {
    /// Records `headline`, refreshing its timestamp when it was seen before.
    fn save_headline(&self, headline: &NewHeadline) -> RepositoryResult<usize>;
}

/// Source of previously analyzed articles for similarity ranking.
pub trait CorpusProvider {
    fn fetch_all_titles(&self) -> Result<Vec<Candidate>, CorpusError>;
}

impl<T: ArticleReader + ?Sized> ArticleReader for Arc<T> {
    fn get_article_by_url(&self, url: &str) -> RepositoryResult<Option<Article>> {
        (**self).get_article_by_url(url)
    }
}

impl<T: ArticleWriter + ?Sized> ArticleWriter for Arc<T> {
    fn save_article(&self, article: &NewArticle) -> RepositoryResult<i32> {
        (**self).save_article(article)
    }
}

impl<T: PredictionReader + ?Sized> PredictionReader for Arc<T> {
    fn get_prediction_by_url(&self, url: &str) -> RepositoryResult<Option<ArticlePrediction>> {
        (**self).get_prediction_by_url(url)
    }
}

impl<T: PredictionWriter + ?Sized> PredictionWriter for Arc<T> {
    fn save_prediction(&self, article_id: i32, prediction: &Prediction) -> RepositoryResult<bool> {
        (**self).save_prediction(article_id, prediction)
    }
}

impl<T: HeadlineReader + ?Sized> HeadlineReader for Arc<T> {
    fn list_recent_headlines(&self, since: NaiveDateTime) -> RepositoryResult<Vec<Headline>> {
        (**self).list_recent_headlines(since)
    }
}

impl<T: HeadlineWriter + ?Sized> HeadlineWriter for Arc<T> {
    fn save_headline(&self, headline: &NewHeadline) -> RepositoryResult<usize> {
        (**self).save_headline(headline)
    }
}

impl<T: CorpusProvider + ?Sized> CorpusProvider for Arc<T> {
    fn fetch_all_titles(&self) -> Result<Vec<Candidate>, CorpusError> {
        (**self).fetch_all_titles()
    }
}
