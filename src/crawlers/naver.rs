use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use tokio::sync::Semaphore;
use url::Url;

use crate::crawlers::{
    ArticleScraper, CrawlerError, CrawlerResult, HeadlineSource, build_reqwest_client, selector,
};
use crate::domain::article::NewArticle;
use crate::domain::headline::NewHeadline;
use crate::models::config::{HeadlinesConfig, ScraperConfig};

/// Crawler for `news.naver.com` article pages and the "most viewed" ranking,
/// limiting concurrent HTTP requests using a [`Semaphore`].
pub struct NaverNewsCrawler {
    ranking_url: Url,
    target_press: Vec<String>,
    per_press_limit: usize,
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl NaverNewsCrawler {
    /// Creates a new crawler.
    ///
    /// `scraper.concurrency` controls how many HTTP requests may be in flight
    /// at the same time.
    pub fn new(scraper: &ScraperConfig, headlines: &HeadlinesConfig) -> CrawlerResult<Self> {
        Ok(Self {
            ranking_url: Url::parse(&headlines.ranking_url)
                .map_err(|e| CrawlerError::Build(e.to_string()))?,
            target_press: headlines.target_press.clone(),
            per_press_limit: headlines.per_press_limit,
            client: build_reqwest_client(scraper)?,
            semaphore: Arc::new(Semaphore::new(scraper.concurrency.max(1))),
        })
    }

    /// Fetches a URL and returns the response body.
    ///
    /// A permit from the internal [`Semaphore`] is held for the duration of
    /// the request.
    async fn fetch_text(&self, url: &str) -> CrawlerResult<String> {
        let request_error = |message: String| CrawlerError::Request {
            url: url.to_string(),
            message,
        };

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| request_error(e.to_string()))?;
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(e.to_string()))?;
        if !res.status().is_success() {
            log::error!("Failed to get URL {}: {}", url, res.status());
            return Err(request_error(res.status().to_string()));
        }
        res.text().await.map_err(|e| request_error(e.to_string()))
    }
}

#[async_trait]
impl ArticleScraper for NaverNewsCrawler {
    async fn fetch_article(&self, url: &str) -> CrawlerResult<NewArticle> {
        let text = self.fetch_text(url).await?;
        parse_article(url, &Html::parse_document(&text))
    }
}

#[async_trait]
impl HeadlineSource for NaverNewsCrawler {
    async fn fetch_headlines(&self) -> CrawlerResult<Vec<NewHeadline>> {
        let text = self.fetch_text(self.ranking_url.as_str()).await?;
        parse_headlines(
            &Html::parse_document(&text),
            &self.ranking_url,
            &self.target_press,
            self.per_press_limit,
        )
    }
}

/// Reads the article title and body text.
///
/// Newlines and tabs are removed from the body. A page without a title is a
/// parse error; an empty body is returned as is.
pub fn parse_article(url: &str, document: &Html) -> CrawlerResult<NewArticle> {
    let title_selector = selector("#title_area")?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    if title.is_empty() {
        return Err(CrawlerError::Parse {
            url: url.to_string(),
            message: "article title not found".to_string(),
        });
    }

    let content_selector = selector("#dic_area")?;
    let content = document
        .select(&content_selector)
        .next()
        .map(|el| {
            el.text()
                .collect::<String>()
                .trim()
                .replace(['\n', '\t'], "")
                .trim()
                .to_string()
        })
        .unwrap_or_default();

    Ok(NewArticle {
        url: url.to_string(),
        title,
        content,
    })
}

/// Collects the top links of every ranking box whose press is in
/// `target_press`. Links are resolved against `base_url`; duplicates within a
/// press are dropped.
pub fn parse_headlines(
    document: &Html,
    base_url: &Url,
    target_press: &[String],
    per_press_limit: usize,
) -> CrawlerResult<Vec<NewHeadline>> {
    let box_selector = selector("div.rankingnews_box")?;
    let press_selector = selector("strong.rankingnews_name")?;
    let item_selector = selector("li")?;
    let link_selector = selector("a")?;

    let mut headlines = Vec::new();
    for ranking_box in document.select(&box_selector) {
        let Some(press_name) = ranking_box
            .select(&press_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
        else {
            continue;
        };
        if !target_press.iter().any(|press| *press == press_name) {
            continue;
        }

        let mut seen_urls = HashSet::new();
        for item in ranking_box.select(&item_selector).take(per_press_limit) {
            let Some(link) = item.select(&link_selector).next() else {
                continue;
            };
            let Some(url) = link
                .value()
                .attr("href")
                .filter(|href| !href.is_empty())
                .and_then(|href| base_url.join(href).ok())
            else {
                continue;
            };
            if !seen_urls.insert(url.to_string()) {
                continue;
            }

            headlines.push(NewHeadline {
                press_name: press_name.clone(),
                title: link.text().collect::<String>().trim().to_string(),
                url: url.to_string(),
            });
        }
    }

    Ok(headlines)
}
