// Diesel table definitions matching `db::SCHEMA`.

diesel::table! {
    scraped_articles (id) {
        id -> Integer,
        url -> Text,
        title -> Text,
        content -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    predictions (id) {
        id -> Integer,
        article_id -> Integer,
        real_news_probability -> Double,
        fake_news_probability -> Double,
        created_at -> Timestamp,
    }
}

diesel::table! {
    headline (id) {
        id -> Integer,
        press_name -> Text,
        url -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(predictions -> scraped_articles (article_id));

diesel::allow_tables_to_appear_in_same_query!(scraped_articles, predictions, headline);
