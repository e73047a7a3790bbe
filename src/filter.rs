//! Review filtering.
//!
//! A [`FilterSpec`] holds up to three independent predicates: location,
//! start date and end date. [`apply`] keeps the reviews that satisfy every
//! active predicate, in their original order. Location-only, date-only and
//! combined requests all go through the same single pass.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::Review;

/// The one timestamp layout every dataset record is expected to use.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Request-scoped set of optional predicates. An empty spec matches every
/// review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact, case-sensitive match on `Location`.
    pub location: Option<String>,
    /// Inclusive lower bound: reviews at or after midnight of this day.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound: reviews on or before this calendar day.
    pub end_date: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Evaluates every active predicate against one review, stopping at the
    /// first that fails.
    pub fn matches(&self, review: &Review) -> Result<bool, InvalidTimestamp> {
        if let Some(location) = &self.location {
            if !matches_location(review, location) {
                return Ok(false);
            }
        }
        if let Some(start) = self.start_date {
            if !on_or_after(review, start)? {
                return Ok(false);
            }
        }
        if let Some(end) = self.end_date {
            if !on_or_before(review, end)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A review's `Timestamp` did not match [`TIMESTAMP_FORMAT`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed Timestamp '{0}'")]
pub struct InvalidTimestamp(pub String);

/// Filtering failed because the loaded data is bad, not the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("review {index} has malformed Timestamp '{value}' (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidTimestamp { index: usize, value: String },
}

pub fn matches_location(review: &Review, location: &str) -> bool {
    review.location == location
}

pub fn on_or_after(review: &Review, start: NaiveDate) -> Result<bool, InvalidTimestamp> {
    Ok(review_instant(review)? >= midnight(start))
}

/// True when the review falls anywhere on or before the calendar day `end`.
pub fn on_or_before(review: &Review, end: NaiveDate) -> Result<bool, InvalidTimestamp> {
    let instant = review_instant(review)?;
    Ok(match end.checked_add_days(Days::new(1)) {
        Some(next_day) => instant < midnight(next_day),
        None => true,
    })
}

/// Returns the reviews matching `spec`, in input order.
///
/// An empty spec returns the whole collection without parsing any
/// timestamps. Any record whose timestamp has to be parsed and cannot be
/// fails the whole call.
pub fn apply<'a>(reviews: &'a [Review], spec: &FilterSpec) -> Result<Vec<&'a Review>, FilterError> {
    if spec.is_empty() {
        return Ok(reviews.iter().collect());
    }
    let mut matched = Vec::new();
    for (index, review) in reviews.iter().enumerate() {
        let keep = spec
            .matches(review)
            .map_err(|InvalidTimestamp(value)| FilterError::InvalidTimestamp { index, value })?;
        if keep {
            matched.push(review);
        }
    }
    Ok(matched)
}

/// Checks every timestamp in the collection, reporting the first that does
/// not parse. Used at startup so bad data is flagged before any request.
pub fn validate_timestamps(reviews: &[Review]) -> Result<(), FilterError> {
    for (index, review) in reviews.iter().enumerate() {
        if parse_timestamp(&review.timestamp).is_none() {
            return Err(FilterError::InvalidTimestamp {
                index,
                value: review.timestamp.clone(),
            });
        }
    }
    Ok(())
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

fn review_instant(review: &Review) -> Result<NaiveDateTime, InvalidTimestamp> {
    parse_timestamp(&review.timestamp).ok_or_else(|| InvalidTimestamp(review.timestamp.clone()))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
