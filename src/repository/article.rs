use chrono::Utc;
use diesel::prelude::*;

use crate::domain::article::{Article, NewArticle};
use crate::models::article::{Article as DbArticle, NewArticle as DbNewArticle};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ArticleReader, ArticleWriter, DieselRepository};

impl ArticleReader for DieselRepository {
    fn get_article_by_url(&self, url: &str) -> RepositoryResult<Option<Article>> {
        use crate::schema::scraped_articles;

        let mut conn = self.conn()?;

        let article = scraped_articles::table
            .filter(scraped_articles::url.eq(url))
            .select(DbArticle::as_select())
            .first::<DbArticle>(&mut conn)
            .optional()?;

        Ok(article.map(Article::from))
    }
}

impl ArticleWriter for DieselRepository {
    fn save_article(&self, article: &NewArticle) -> RepositoryResult<i32> {
        use crate::schema::scraped_articles;

        let mut conn = self.conn()?;

        let id = conn.transaction(|conn| {
            // Keep the first copy of an article; later scrapes are ignored
            let existing = scraped_articles::table
                .filter(scraped_articles::url.eq(&article.url))
                .select(scraped_articles::id)
                .first::<i32>(conn)
                .optional()?;
            if let Some(id) = existing {
                log::debug!("Article already stored: {}", article.url);
                return Ok::<i32, RepositoryError>(id);
            }

            let row = DbNewArticle::from_domain(article, Utc::now().naive_utc());
            let id = diesel::insert_into(scraped_articles::table)
                .values(&row)
                .returning(scraped_articles::id)
                .get_result::<i32>(conn)?;
            Ok(id)
        })?;

        Ok(id)
    }
}
