use diesel::prelude::*;

use crate::domain::candidate::Candidate;
use crate::repository::errors::{CorpusError, RepositoryError};
use crate::repository::{CorpusProvider, DieselRepository};

impl CorpusProvider for DieselRepository {
    fn fetch_all_titles(&self) -> Result<Vec<Candidate>, CorpusError> {
        use crate::schema::{predictions, scraped_articles};

        let mut conn = self.conn().map_err(CorpusError::StoreUnavailable)?;

        // Ordered by id so ties in similarity resolve the same way every time
        let rows = scraped_articles::table
            .inner_join(predictions::table)
            .order(scraped_articles::id.asc())
            .select((
                scraped_articles::title,
                scraped_articles::url,
                predictions::real_news_probability,
            ))
            .load::<(String, String, f64)>(&mut conn)
            .map_err(|e| CorpusError::StoreUnavailable(RepositoryError::from(e)))?;

        Ok(rows
            .into_iter()
            .map(|(title, url, prior_score)| Candidate::new(title, url, prior_score))
            .collect())
    }
}
