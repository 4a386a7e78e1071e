//! Diesel rows for `headline`.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::headline;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = headline)]
pub struct NewHeadline<'a> {
    pub press_name: &'a str,
    pub url: &'a str,
    pub created_at: NaiveDateTime,
}
