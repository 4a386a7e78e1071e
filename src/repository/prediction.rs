use chrono::Utc;
use diesel::prelude::*;

use crate::domain::prediction::{ArticlePrediction, Prediction};
use crate::models::prediction::NewPrediction;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PredictionReader, PredictionWriter};

impl PredictionReader for DieselRepository {
    fn get_prediction_by_url(&self, url: &str) -> RepositoryResult<Option<ArticlePrediction>> {
        use crate::schema::{predictions, scraped_articles};

        let mut conn = self.conn()?;

        let row = predictions::table
            .inner_join(scraped_articles::table)
            .filter(scraped_articles::url.eq(url))
            .select((
                scraped_articles::title,
                predictions::real_news_probability,
                predictions::fake_news_probability,
            ))
            .first::<(String, f64, f64)>(&mut conn)
            .optional()?;

        Ok(row.map(|(title, real, fake)| ArticlePrediction {
            title,
            prediction: Prediction {
                real_news_probability: real,
                fake_news_probability: fake,
            },
        }))
    }
}

impl PredictionWriter for DieselRepository {
    fn save_prediction(&self, article_id: i32, prediction: &Prediction) -> RepositoryResult<bool> {
        use crate::schema::predictions;

        for probability in [
            prediction.real_news_probability,
            prediction.fake_news_probability,
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(RepositoryError::ValidationError(format!(
                    "probability {probability} is outside [0, 1]"
                )));
            }
        }

        let mut conn = self.conn()?;

        let inserted = diesel::insert_into(predictions::table)
            .values(&NewPrediction {
                article_id,
                real_news_probability: prediction.real_news_probability,
                fake_news_probability: prediction.fake_news_probability,
                created_at: Utc::now().naive_utc(),
            })
            .on_conflict(predictions::article_id)
            .do_nothing()
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }
}
