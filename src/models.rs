//! Core data models used throughout the review analyzer.
//!
//! A [`Review`] is one row of the loaded dataset. The three columns the
//! filters need are typed; every other column rides along untouched in
//! [`Review::extra`] so responses echo the dataset back exactly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A customer review as loaded from the dataset.
///
/// Field names on the wire match the dataset column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "Location")]
    pub location: String,
    /// Formatted as `YYYY-MM-DD HH:MM:SS`. Parsed only when a date filter
    /// is active.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "ReviewBody")]
    pub review_body: String,
    /// Any additional columns, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Review {
    pub fn new(
        location: impl Into<String>,
        timestamp: impl Into<String>,
        review_body: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            timestamp: timestamp.into(),
            review_body: review_body.into(),
            extra: Map::new(),
        }
    }

    /// Adds an extra column, returning the review for chaining.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Polarity scores for a piece of text.
///
/// `neg`, `neu` and `pos` are proportions that sum to 1. `compound` is the
/// normalized overall valence in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    /// Scores for text carrying no sentiment at all.
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// A review in a response: the original record plus its sentiment.
///
/// Borrows the review so annotation never touches the loaded collection.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedReview<'a> {
    #[serde(flatten)]
    pub review: &'a Review,
    pub sentiment: SentimentScores,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_review_roundtrips_extra_columns() {
        let raw = json!({
            "Location": "NYC",
            "Timestamp": "2023-05-01 10:00:00",
            "ReviewBody": "Great pizza",
            "ReviewId": "abc-123",
            "Stars": 5
        });
        let review: Review = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(review.location, "NYC");
        assert_eq!(review.extra.get("Stars"), Some(&json!(5)));
        assert_eq!(serde_json::to_value(&review).unwrap(), raw);
    }

    #[test]
    fn test_annotated_review_adds_only_sentiment() {
        let review = Review::new("LA", "2023-01-02 03:04:05", "meh").with_field("ReviewId", "r1");
        let annotated = AnnotatedReview {
            review: &review,
            sentiment: SentimentScores::neutral(),
        };
        let value = serde_json::to_value(&annotated).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["Location"], "LA");
        assert_eq!(obj["Timestamp"], "2023-01-02 03:04:05");
        assert_eq!(obj["ReviewBody"], "meh");
        assert_eq!(obj["ReviewId"], "r1");
        assert_eq!(obj["sentiment"]["neu"], 1.0);
    }
}
