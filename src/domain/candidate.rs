use serde::Serialize;

/// A previously analyzed article eligible for similarity comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    /// Real-news probability computed by the classifier.
    #[serde(rename = "probability")]
    pub prior_score: f64,
}

impl Candidate {
    pub fn new(title: impl Into<String>, url: impl Into<String>, prior_score: f64) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            prior_score,
        }
    }
}

/// A [`Candidate`] with its similarity to the query title.
///
/// Serialized flat as `{ title, url, probability, similarity }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::{Candidate, ScoredCandidate};

    #[test]
    fn scored_candidate_serializes_flat() {
        let scored = ScoredCandidate {
            candidate: Candidate::new("제목", "https://n.news.naver.com/article/1/2", 0.25),
            similarity: 0.5,
        };

        let value = serde_json::to_value(&scored).expect("serializable");

        assert_eq!(
            value,
            serde_json::json!({
                "title": "제목",
                "url": "https://n.news.naver.com/article/1/2",
                "probability": 0.25,
                "similarity": 0.5,
            })
        );
    }
}
