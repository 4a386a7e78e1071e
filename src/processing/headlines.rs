use std::collections::HashSet;

use chrono::{TimeDelta, Utc};
use futures::future;

use crate::classifier::ArticleClassifier;
use crate::crawlers::{ArticleScraper, CrawlerResult, HeadlineSource};
use crate::domain::headline::{Headline, NewHeadline};
use crate::processing::analysis::AnalysisError;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ArticleReader, ArticleWriter, HeadlineReader, HeadlineWriter, PredictionReader,
    PredictionWriter,
};

/// Counters reported after a headline refresh.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeadlineStats {
    pub headlines: usize,
    pub analyzed: usize,
    pub already_analyzed: usize,
    /// Links to an article already listed by another press in the same run.
    pub duplicates: usize,
    pub empty_content: usize,
    pub failed: usize,
}

enum ItemOutcome {
    Analyzed,
    AlreadyAnalyzed,
    EmptyContent,
    Failed,
}

async fn process_headline<R, S, C>(
    headline: &NewHeadline,
    repo: &R,
    scraper: &S,
    classifier: &C,
) -> Result<ItemOutcome, AnalysisError>
where
    R: ArticleReader + ArticleWriter + PredictionReader + PredictionWriter + HeadlineWriter + Sync,
    S: ArticleScraper + ?Sized,
    C: ArticleClassifier + ?Sized,
{
    let url = headline.url.as_str();
    repo.save_headline(headline)?;

    if repo.get_prediction_by_url(url)?.is_some() {
        log::debug!("Headline already analyzed, skipping: {url}");
        return Ok(ItemOutcome::AlreadyAnalyzed);
    }

    let article_id = match repo.get_article_by_url(url)? {
        Some(article) => article.id,
        None => {
            let article = scraper.fetch_article(url).await?;
            if article.content.is_empty() {
                log::warn!("Article body not found: {url}");
                return Ok(ItemOutcome::EmptyContent);
            }
            let id = repo.save_article(&article)?;
            log::info!("Stored article: {}", article.title);
            id
        }
    };

    let prediction = classifier.classify(url).await?;
    repo.save_prediction(article_id, &prediction)?;
    log::info!(
        "Analyzed headline {url}: real={:.3}, fake={:.3}",
        prediction.real_news_probability,
        prediction.fake_news_probability
    );

    Ok(ItemOutcome::Analyzed)
}

/// Scrapes the ranking page and analyzes every new headline article.
///
/// Failures of individual headlines are logged and counted; only a failure to
/// fetch the ranking itself aborts the run. An article listed by several
/// presses is recorded under each of them but analyzed once.
pub async fn refresh_headlines<R, H, S, C>(
    repo: &R,
    source: &H,
    scraper: &S,
    classifier: &C,
) -> CrawlerResult<HeadlineStats>
where
    R: ArticleReader + ArticleWriter + PredictionReader + PredictionWriter + HeadlineWriter + Sync,
    H: HeadlineSource + ?Sized,
    S: ArticleScraper + ?Sized,
    C: ArticleClassifier + ?Sized,
{
    log::info!("Started headline refresh");

    let headlines = source.fetch_headlines().await?;
    log::info!("Fetched {} headlines", headlines.len());

    let mut seen_urls = HashSet::new();
    let (unique, duplicates): (Vec<&NewHeadline>, Vec<&NewHeadline>) = headlines
        .iter()
        .partition(|headline| {
            let headline: &NewHeadline = *headline;
            seen_urls.insert(headline.url.as_str())
        });

    let mut stats = HeadlineStats {
        headlines: headlines.len(),
        ..Default::default()
    };
    for headline in duplicates {
        match repo.save_headline(headline) {
            Ok(_) => stats.duplicates += 1,
            Err(e) => {
                log::error!("Failed to store headline {}: {e}", headline.url);
                stats.failed += 1;
            }
        }
    }

    let tasks = unique.into_iter().map(|headline| async move {
        match process_headline(headline, repo, scraper, classifier).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Failed to process headline {}: {e}", headline.url);
                ItemOutcome::Failed
            }
        }
    });
    let outcomes = future::join_all(tasks).await;

    for outcome in outcomes {
        match outcome {
            ItemOutcome::Analyzed => stats.analyzed += 1,
            ItemOutcome::AlreadyAnalyzed => stats.already_analyzed += 1,
            ItemOutcome::EmptyContent => stats.empty_content += 1,
            ItemOutcome::Failed => stats.failed += 1,
        }
    }

    log::info!(
        "Finished headline refresh: headlines={}, analyzed={}, already_analyzed={}, duplicates={}, empty_content={}, failed={}",
        stats.headlines,
        stats.analyzed,
        stats.already_analyzed,
        stats.duplicates,
        stats.empty_content,
        stats.failed
    );

    Ok(stats)
}

/// Headlines recorded during the last `window_minutes`.
///
/// A window that cannot be represented as a point in time is a
/// [`RepositoryError::ValidationError`].
pub fn recent_headlines<R>(repo: &R, window_minutes: i64) -> RepositoryResult<Vec<Headline>>
where
    R: HeadlineReader + ?Sized,
{
    let since = TimeDelta::try_minutes(window_minutes)
        .and_then(|window| Utc::now().naive_utc().checked_sub_signed(window))
        .ok_or_else(|| {
            RepositoryError::ValidationError(format!(
                "recent headline window of {window_minutes} minutes is out of range"
            ))
        })?;
    repo.list_recent_headlines(since)
}
