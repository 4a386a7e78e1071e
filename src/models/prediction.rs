//! Diesel rows for `predictions`.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::predictions;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = predictions)]
pub struct NewPrediction {
    pub article_id: i32,
    pub real_news_probability: f64,
    pub fake_news_probability: f64,
    pub created_at: NaiveDateTime,
}
