use serde::{Deserialize, Serialize};

/// Class probabilities returned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub real_news_probability: f64,
    pub fake_news_probability: f64,
}

/// A stored prediction together with the title of the article it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePrediction {
    pub title: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}
