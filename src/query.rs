//! Query-string interpretation.
//!
//! Turns the raw `(key, value)` pairs of a request into a [`FilterSpec`].
//! Each recognized key switches on one predicate; the rest are ignored.

use chrono::NaiveDate;
use thiserror::Error;

use crate::filter::FilterSpec;

pub const LOCATION_PARAM: &str = "location";
pub const START_DATE_PARAM: &str = "start_date";
pub const END_DATE_PARAM: &str = "end_date";

/// Date layout accepted by `start_date` and `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A query parameter the caller got wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid {param} '{value}': expected a date formatted as YYYY-MM-DD")]
    InvalidDate { param: &'static str, value: String },
}

impl QueryError {
    pub fn param(&self) -> &'static str {
        match self {
            QueryError::InvalidDate { param, .. } => *param,
        }
    }
}

/// Builds a [`FilterSpec`] from query parameters.
///
/// When a key is repeated only its first value counts. A malformed date
/// rejects the whole query rather than dropping that one filter.
pub fn interpret(params: &[(String, String)]) -> Result<FilterSpec, QueryError> {
    Ok(FilterSpec {
        location: first(params, LOCATION_PARAM).map(str::to_string),
        start_date: first(params, START_DATE_PARAM)
            .map(|v| parse_date(START_DATE_PARAM, v))
            .transpose()?,
        end_date: first(params, END_DATE_PARAM)
            .map(|v| parse_date(END_DATE_PARAM, v))
            .transpose()?,
    })
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn parse_date(param: &'static str, value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| QueryError::InvalidDate {
        param,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_is_empty_spec() {
        let spec = interpret(&[]).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_all_params_combine_into_one_spec() {
        let spec = interpret(&params(&[
            ("location", "NYC"),
            ("start_date", "2023-05-01"),
            ("end_date", "2023-05-31"),
        ]))
        .unwrap();
        assert_eq!(spec.location.as_deref(), Some("NYC"));
        assert_eq!(spec.start_date, NaiveDate::from_ymd_opt(2023, 5, 1));
        assert_eq!(spec.end_date, NaiveDate::from_ymd_opt(2023, 5, 31));
    }

    #[test]
    fn test_each_param_is_independent() {
        let spec = interpret(&params(&[("end_date", "2023-05-31")])).unwrap();
        assert_eq!(spec.location, None);
        assert_eq!(spec.start_date, None);
        assert!(spec.end_date.is_some());
    }

    #[test]
    fn test_first_value_wins() {
        let spec = interpret(&params(&[
            ("location", "LA"),
            ("location", "NYC"),
            ("start_date", "2023-01-01"),
            ("start_date", "garbage"),
        ]))
        .unwrap();
        assert_eq!(spec.location.as_deref(), Some("LA"));
        assert_eq!(spec.start_date, NaiveDate::from_ymd_opt(2023, 1, 1));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let spec = interpret(&params(&[("page", "2"), ("sort", "asc")])).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let err = interpret(&params(&[
            ("location", "NYC"),
            ("start_date", "not-a-date"),
        ]))
        .unwrap_err();
        assert_eq!(err.param(), "start_date");
        assert!(err.to_string().contains("not-a-date"));
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = interpret(&params(&[("end_date", "2023-13-01")])).unwrap_err();
        assert_eq!(err.param(), "end_date");
    }

    #[test]
    fn test_datetime_is_not_a_date() {
        assert!(interpret(&params(&[("start_date", "2023-05-01 10:00:00")])).is_err());
    }

    #[test]
    fn test_empty_date_is_rejected_but_empty_location_is_kept() {
        assert!(interpret(&params(&[("start_date", "")])).is_err());
        let spec = interpret(&params(&[("location", "")])).unwrap();
        assert_eq!(spec.location.as_deref(), Some(""));
    }
}
