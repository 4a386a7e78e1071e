use serde::Serialize;
use thiserror::Error;

use crate::classifier::{ArticleClassifier, ClassifierError};
use crate::crawlers::{ArticleScraper, CrawlerError, is_supported_article_url};
use crate::domain::candidate::ScoredCandidate;
use crate::domain::prediction::ArticlePrediction;
use crate::ranking::{RankWindow, rank_window};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    ArticleReader, ArticleWriter, CorpusProvider, PredictionReader, PredictionWriter,
};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("not a supported news article url: {0}")]
    UnsupportedUrl(String),

    #[error(transparent)]
    Crawler(#[from] CrawlerError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("prediction not found after classification: {0}")]
    PredictionMissing(String),
}

/// Classification of an article plus the most similar stored articles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    #[serde(flatten)]
    pub prediction: ArticlePrediction,
    pub sim: Vec<ScoredCandidate>,
}

/// Ranks stored articles against `title`.
///
/// The article at `url` is excluded from its own results when it is already
/// stored. Corpus failures are logged and produce an empty list so that the
/// classification can still be returned.
pub fn similar_articles<R>(
    repo: &R,
    title: &str,
    url: &str,
    window: RankWindow,
) -> Vec<ScoredCandidate>
where
    R: CorpusProvider + ?Sized,
{
    let mut candidates = match repo.fetch_all_titles() {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!("Similar articles unavailable for {url}: {e}");
            return Vec::new();
        }
    };

    // Move the article itself to the front; the stable sort then ranks it
    // ahead of any other article with the same title.
    let self_position = candidates.iter().position(|c| c.url == url);
    if let Some(position) = self_position {
        let own = candidates.remove(position);
        candidates.insert(0, own);
    }

    rank_window(title, &candidates, self_position.is_some(), window)
}

/// Returns the stored classification of `url`, analyzing the article first
/// when it has not been classified yet.
pub async fn analyze_url<R, S, C>(
    url: &str,
    repo: &R,
    scraper: &S,
    classifier: &C,
    window: RankWindow,
) -> Result<AnalysisOutcome, AnalysisError>
where
    R: ArticleReader + ArticleWriter + PredictionReader + PredictionWriter + CorpusProvider + Sync,
    S: ArticleScraper + ?Sized,
    C: ArticleClassifier + ?Sized,
{
    if !is_supported_article_url(url) {
        return Err(AnalysisError::UnsupportedUrl(url.to_string()));
    }

    if let Some(existing) = repo.get_prediction_by_url(url)? {
        log::debug!("Found existing prediction for {url}");
        let sim = similar_articles(repo, &existing.title, url, window);
        return Ok(AnalysisOutcome {
            prediction: existing,
            sim,
        });
    }

    let article_id = match repo.get_article_by_url(url)? {
        Some(article) => article.id,
        None => {
            let article = scraper.fetch_article(url).await?;
            repo.save_article(&article)?
        }
    };

    let prediction = classifier.classify(url).await?;
    repo.save_prediction(article_id, &prediction)?;

    let stored = repo
        .get_prediction_by_url(url)?
        .ok_or_else(|| AnalysisError::PredictionMissing(url.to_string()))?;
    log::info!(
        "Analyzed {url}: real={:.3}, fake={:.3}",
        stored.prediction.real_news_probability,
        stored.prediction.fake_news_probability
    );

    let sim = similar_articles(repo, &stored.title, url, window);
    Ok(AnalysisOutcome {
        prediction: stored,
        sim,
    })
}
