//! The per-request filter-and-annotate pass.
//!
//! [`ReviewPipeline`] owns the read-only review collection and the
//! sentiment analyzer for the life of the process. Each call filters the
//! collection with a [`FilterSpec`] and scores only the survivors; nothing
//! is cached and the collection itself is never touched.

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::dataset;
use crate::filter::{self, FilterError, FilterSpec};
use crate::models::{AnnotatedReview, Review};
use crate::sentiment::{LexiconAnalyzer, SentimentAnalyzer};

#[derive(Clone)]
pub struct ReviewPipeline {
    reviews: Arc<Vec<Review>>,
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl ReviewPipeline {
    pub fn new(reviews: Vec<Review>, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self {
            reviews: Arc::new(reviews),
            analyzer,
        }
    }

    /// Loads the dataset and lexicon named in `config`.
    ///
    /// Records with unparsable timestamps are reported but kept; they only
    /// fail requests that actually filter by date.
    pub fn from_config(config: &Config) -> Result<Self> {
        let reviews = dataset::load_reviews(&config.dataset)?;
        tracing::info!(
            reviews = reviews.len(),
            path = %config.dataset.path.display(),
            "loaded dataset"
        );
        if let Err(e) = filter::validate_timestamps(&reviews) {
            tracing::warn!(error = %e, "dataset contains malformed timestamps; date filters will fail");
        }
        let analyzer = LexiconAnalyzer::load(config.sentiment.lexicon.as_deref())?;
        Ok(Self::new(reviews, Arc::new(analyzer)))
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Filters the collection with `spec` and annotates each match.
    pub fn run(&self, spec: &FilterSpec) -> Result<Vec<AnnotatedReview<'_>>, FilterError> {
        let matched = filter::apply(&self.reviews, spec)?;
        Ok(annotate(matched, self.analyzer.as_ref()))
    }
}

/// Scores each review's body, leaving the review itself untouched.
pub fn annotate<'a>(
    reviews: Vec<&'a Review>,
    analyzer: &dyn SentimentAnalyzer,
) -> Vec<AnnotatedReview<'a>> {
    reviews
        .into_iter()
        .map(|review| AnnotatedReview {
            sentiment: analyzer.polarity_scores(&review.review_body),
            review,
        })
        .collect()
}
