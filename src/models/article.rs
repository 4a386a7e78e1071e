//! Diesel rows for `scraped_articles`.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::schema::scraped_articles;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = scraped_articles)]
pub struct Article {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scraped_articles)]
pub struct NewArticle<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: NaiveDateTime,
}

impl From<Article> for DomainArticle {
    fn from(row: Article) -> Self {
        Self {
            id: row.id,
            url: row.url,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

impl<'a> NewArticle<'a> {
    pub fn from_domain(article: &'a DomainNewArticle, created_at: NaiveDateTime) -> Self {
        Self {
            url: &article.url,
            title: &article.title,
            content: &article.content,
            created_at,
        }
    }
}
