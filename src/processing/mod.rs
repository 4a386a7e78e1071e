use std::sync::Arc;

use serde::Deserialize;

use crate::classifier::ArticleClassifier;
use crate::crawlers::{ArticleScraper, HeadlineSource};
use crate::domain::headline::Headline;
use crate::processing::analysis::{AnalysisError, AnalysisOutcome};
use crate::processing::headlines::HeadlineStats;
use crate::ranking::RankWindow;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ArticleReader, ArticleWriter, CorpusProvider, HeadlineReader, HeadlineWriter,
    PredictionReader, PredictionWriter,
};
use crate::scheduler::SingleFlight;

pub mod analysis;
pub mod headlines;

#[cfg(test)]
pub(crate) mod testing;

/// Jobs accepted on the ZMQ socket, e.g. `"RefreshHeadlines"` or
/// `{"Analyze": "https://n.news.naver.com/article/..."}`.
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub enum NewsMessage {
    RefreshHeadlines,
    Analyze(String),
}

/// Every storage capability the pipelines need.
pub trait NewsRepository:
    ArticleReader
    + ArticleWriter
    + PredictionReader
    + PredictionWriter
    + HeadlineReader
    + HeadlineWriter
    + CorpusProvider
    + Send
    + Sync
{
}

impl<T> NewsRepository for T where
    T: ArticleReader
        + ArticleWriter
        + PredictionReader
        + PredictionWriter
        + HeadlineReader
        + HeadlineWriter
        + CorpusProvider
        + Send
        + Sync
{
}

/// Wires a repository with the scraper, headline source and classifier.
///
/// Cheap to clone; all clones share the headline single-flight guard.
pub struct NewsPipeline<R> {
    repo: R,
    scraper: Arc<dyn ArticleScraper>,
    headline_source: Arc<dyn HeadlineSource>,
    classifier: Arc<dyn ArticleClassifier>,
    window: RankWindow,
    recent_window_minutes: i64,
    headline_guard: SingleFlight,
}

impl<R: Clone> Clone for NewsPipeline<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            scraper: Arc::clone(&self.scraper),
            headline_source: Arc::clone(&self.headline_source),
            classifier: Arc::clone(&self.classifier),
            window: self.window,
            recent_window_minutes: self.recent_window_minutes,
            headline_guard: self.headline_guard.clone(),
        }
    }
}

impl<R: NewsRepository> NewsPipeline<R> {
    pub fn new(
        repo: R,
        scraper: Arc<dyn ArticleScraper>,
        headline_source: Arc<dyn HeadlineSource>,
        classifier: Arc<dyn ArticleClassifier>,
    ) -> Self {
        Self {
            repo,
            scraper,
            headline_source,
            classifier,
            window: RankWindow::default(),
            recent_window_minutes: 60,
            headline_guard: SingleFlight::new(),
        }
    }

    pub fn with_window(mut self, window: RankWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_recent_window_minutes(mut self, minutes: i64) -> Self {
        self.recent_window_minutes = minutes;
        self
    }

    pub fn headline_guard(&self) -> SingleFlight {
        self.headline_guard.clone()
    }

    pub async fn analyze(&self, url: &str) -> Result<AnalysisOutcome, AnalysisError> {
        analysis::analyze_url(
            url,
            &self.repo,
            self.scraper.as_ref(),
            self.classifier.as_ref(),
            self.window,
        )
        .await
    }

    /// Runs a headline refresh unless one is already in progress.
    ///
    /// Returns `None` when the run was skipped.
    pub async fn refresh_headlines(&self) -> Option<HeadlineStats> {
        self.headline_guard
            .run("headline refresh", || async {
                match headlines::refresh_headlines(
                    &self.repo,
                    self.headline_source.as_ref(),
                    self.scraper.as_ref(),
                    self.classifier.as_ref(),
                )
                .await
                {
                    Ok(stats) => stats,
                    Err(e) => {
                        log::error!("Headline refresh failed: {e}");
                        HeadlineStats::default()
                    }
                }
            })
            .await
    }

    pub fn recent_headlines(&self) -> RepositoryResult<Vec<Headline>> {
        headlines::recent_headlines(&self.repo, self.recent_window_minutes)
    }

    /// Handles a job received over ZMQ.
    pub async fn process_message(&self, msg: NewsMessage) {
        log::info!("Received message: {msg:?}");

        match msg {
            NewsMessage::RefreshHeadlines => {
                self.refresh_headlines().await;
            }
            NewsMessage::Analyze(url) => match self.analyze(&url).await {
                Ok(outcome) => log::info!(
                    "Finished analyzing {url}: {} similar articles",
                    outcome.sim.len()
                ),
                Err(e) => log::error!("Failed to analyze {url}: {e}"),
            },
        }
    }
}
