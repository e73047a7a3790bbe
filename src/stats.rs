//! Dataset statistics.
//!
//! Summarizes what was loaded: review counts, the per-location breakdown,
//! the covered time span and any records with malformed timestamps. Used by
//! `review-analyzer stats` to sanity-check a dataset before serving it.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::filter::parse_timestamp;
use crate::models::Review;

/// Summary of a loaded review collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub total: usize,
    /// Review count per location, sorted by location.
    pub by_location: BTreeMap<String, usize>,
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
    /// Indices of records whose timestamp does not parse.
    pub malformed: Vec<usize>,
}

pub fn compute_stats(reviews: &[Review]) -> DatasetStats {
    let mut by_location: BTreeMap<String, usize> = BTreeMap::new();
    let mut earliest: Option<NaiveDateTime> = None;
    let mut latest: Option<NaiveDateTime> = None;
    let mut malformed = Vec::new();

    for (i, review) in reviews.iter().enumerate() {
        *by_location.entry(review.location.clone()).or_default() += 1;
        match parse_timestamp(&review.timestamp) {
            Some(ts) => {
                earliest = Some(earliest.map_or(ts, |e| e.min(ts)));
                latest = Some(latest.map_or(ts, |l| l.max(ts)));
            }
            None => malformed.push(i),
        }
    }

    DatasetStats {
        total: reviews.len(),
        by_location,
        earliest,
        latest,
        malformed,
    }
}

/// Print a summary of `reviews` to stdout.
pub fn print_stats(reviews: &[Review]) {
    let stats = compute_stats(reviews);

    println!("Review Analyzer — Dataset Stats");
    println!("===============================");
    println!();
    println!("  Reviews:     {}", stats.total);
    println!("  Locations:   {}", stats.by_location.len());
    match (stats.earliest, stats.latest) {
        (Some(first), Some(last)) => {
            println!("  Earliest:    {}", first.format("%Y-%m-%d %H:%M:%S"));
            println!("  Latest:      {}", last.format("%Y-%m-%d %H:%M:%S"));
        }
        _ => println!("  Time span:   n/a"),
    }
    if !stats.malformed.is_empty() {
        println!(
            "  Malformed:   {} record{} (first at index {})",
            stats.malformed.len(),
            if stats.malformed.len() == 1 { "" } else { "s" },
            stats.malformed[0]
        );
    }

    if !stats.by_location.is_empty() {
        println!();
        println!("  By location:");
        println!("  {:<32} {:>8}", "LOCATION", "REVIEWS");
        println!("  {}", "-".repeat(41));
        for (location, count) in &stats.by_location {
            println!("  {:<32} {:>8}", location, count);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_stats() {
        let reviews = vec![
            Review::new("NYC", "2023-05-03 12:00:00", "a"),
            Review::new("LA", "2023-05-01 09:00:00", "b"),
            Review::new("NYC", "bogus", "c"),
        ];
        let stats = compute_stats(&reviews);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_location["NYC"], 2);
        assert_eq!(stats.by_location["LA"], 1);
        assert_eq!(stats.earliest, parse_timestamp("2023-05-01 09:00:00"));
        assert_eq!(stats.latest, parse_timestamp("2023-05-03 12:00:00"));
        assert_eq!(stats.malformed, vec![2]);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.earliest.is_none());
        assert!(stats.by_location.is_empty());
    }
}
