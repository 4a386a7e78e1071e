use chrono::NaiveDateTime;
use serde::Serialize;

/// A headline link scraped from the ranking page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeadline {
    pub press_name: String,
    pub title: String,
    pub url: String,
}

/// A recent headline with the classification of its article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub press_name: String,
    pub url: String,
    pub title: String,
    pub real_news_probability: f64,
    pub fake_news_probability: f64,
    pub created_at: NaiveDateTime,
}
