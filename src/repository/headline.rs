use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::headline::{Headline, NewHeadline};
use crate::models::headline::NewHeadline as DbNewHeadline;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, HeadlineReader, HeadlineWriter};

impl HeadlineReader for DieselRepository {
    fn list_recent_headlines(&self, since: NaiveDateTime) -> RepositoryResult<Vec<Headline>> {
        use crate::schema::{headline, predictions, scraped_articles};

        let mut conn = self.conn()?;

        let rows = headline::table
            .inner_join(scraped_articles::table.on(scraped_articles::url.eq(headline::url)))
            .inner_join(
                predictions::table.on(predictions::article_id.eq(scraped_articles::id)),
            )
            .filter(headline::created_at.ge(since))
            .order(headline::created_at.desc())
            .select((
                headline::press_name,
                headline::url,
                scraped_articles::title,
                predictions::real_news_probability,
                predictions::fake_news_probability,
                headline::created_at,
            ))
            .load::<(String, String, String, f64, f64, NaiveDateTime)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(press_name, url, title, real, fake, created_at)| Headline {
                    press_name,
                    url,
                    title,
                    real_news_probability: real,
                    fake_news_probability: fake,
                    created_at,
                },
            )
            .collect())
    }
}

impl HeadlineWriter for DieselRepository {
    fn save_headline(&self, new_headline: &NewHeadline) -> RepositoryResult<usize> {
        use crate::schema::headline;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let affected = diesel::insert_into(headline::table)
            .values(&DbNewHeadline {
                press_name: &new_headline.press_name,
                url: &new_headline.url,
                created_at: now,
            })
            .on_conflict((headline::press_name, headline::url))
            .do_update()
            .set(headline::created_at.eq(now))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
