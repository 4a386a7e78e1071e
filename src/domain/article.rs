use chrono::NaiveDateTime;
use serde::Serialize;

/// An article persisted in the `scraped_articles` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Article text extracted from a news page, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub url: String,
    pub title: String,
    pub content: String,
}
