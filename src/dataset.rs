//! Dataset loading.
//!
//! Reads the review collection once at startup. Three layouts are
//! supported:
//!
//! | Format | Layout |
//! |--------|--------|
//! | `csv`   | Header row; one review per row |
//! | `json`  | A single array of review objects |
//! | `jsonl` | One review object per line |
//!
//! Every record must carry `Location`, `Timestamp` and `ReviewBody`; all
//! other columns are kept as-is. Record order is preserved.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::DatasetConfig;
use crate::models::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
    JsonLines,
}

impl DatasetFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            other => bail!("Unknown dataset format: '{}'", other),
        }
    }

    /// Picks a format from the configured name, else the file extension.
    pub fn resolve(config: &DatasetConfig) -> Result<Self> {
        if let Some(name) = &config.format {
            return Self::from_name(name);
        }
        let ext = config
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some(ext) => Self::from_name(ext).with_context(|| {
                format!(
                    "Cannot infer dataset format of {}; set dataset.format",
                    config.path.display()
                )
            }),
            None => Ok(Self::Csv),
        }
    }
}

pub fn load_reviews(config: &DatasetConfig) -> Result<Vec<Review>> {
    let format = DatasetFormat::resolve(config)?;
    let file = File::open(&config.path)
        .with_context(|| format!("Failed to open dataset: {}", config.path.display()))?;
    read_reviews(BufReader::new(file), format)
        .with_context(|| format!("Failed to load dataset: {}", config.path.display()))
}

pub fn load_reviews_from_path(path: &Path) -> Result<Vec<Review>> {
    load_reviews(&DatasetConfig {
        path: path.to_path_buf(),
        format: None,
    })
}

pub fn read_reviews<R: BufRead>(reader: R, format: DatasetFormat) -> Result<Vec<Review>> {
    match format {
        DatasetFormat::Csv => read_csv(reader),
        DatasetFormat::Json => read_json(reader),
        DatasetFormat::JsonLines => read_json_lines(reader),
    }
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<Review>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
    let headers = rdr.headers().context("Failed to read CSV header row")?.clone();

    let mut reviews = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        reviews.push(to_review(Value::Object(row)).with_context(|| format!("line {}", line))?);
    }
    Ok(reviews)
}

fn read_json<R: Read>(reader: R) -> Result<Vec<Review>> {
    let value: Value = serde_json::from_reader(reader).context("Invalid JSON")?;
    let items = match value {
        Value::Array(items) => items,
        _ => bail!("expected a JSON array of reviews"),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| to_review(item).with_context(|| format!("record {}", i)))
        .collect()
}

fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<Review>> {
    let mut reviews = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(&line).with_context(|| format!("line {}: invalid JSON", i + 1))?;
        reviews.push(to_review(value).with_context(|| format!("line {}", i + 1))?);
    }
    Ok(reviews)
}

fn to_review(value: Value) -> Result<Review> {
    if !value.is_object() {
        bail!("expected a review object");
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CSV: &str = "\
ReviewId,Location,Timestamp,ReviewBody
a1,NYC,2023-05-01 10:00:00,\"Great bagels, friendly staff\"
a2,LA,2023-05-02 11:00:00,Terrible parking
";

    #[test]
    fn test_csv_keeps_all_columns_in_order() {
        let reviews = read_reviews(Cursor::new(CSV), DatasetFormat::Csv).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].location, "NYC");
        assert_eq!(reviews[0].review_body, "Great bagels, friendly staff");
        assert_eq!(reviews[0].extra["ReviewId"], "a1");
        assert_eq!(reviews[1].timestamp, "2023-05-02 11:00:00");
    }

    #[test]
    fn test_csv_missing_column_is_an_error() {
        let csv = "Location,ReviewBody\nNYC,hello\n";
        let err = read_reviews(Cursor::new(csv), DatasetFormat::Csv).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Timestamp"), "{}", msg);
        assert!(msg.contains("line 2"), "{}", msg);
    }

    #[test]
    fn test_json_array() {
        let json = r#"[
            {"Location": "NYC", "Timestamp": "2023-05-01 10:00:00", "ReviewBody": "ok", "Stars": 4},
            {"Location": "LA", "Timestamp": "2023-05-02 10:00:00", "ReviewBody": "bad"}
        ]"#;
        let reviews = read_reviews(Cursor::new(json), DatasetFormat::Json).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].extra["Stars"], 4);
        assert!(read_reviews(Cursor::new("{}"), DatasetFormat::Json).is_err());
    }

    #[test]
    fn test_json_lines_skips_blank_lines() {
        let jsonl = "{\"Location\":\"NYC\",\"Timestamp\":\"2023-05-01 10:00:00\",\"ReviewBody\":\"a\"}\n\n\
                     {\"Location\":\"LA\",\"Timestamp\":\"2023-05-02 10:00:00\",\"ReviewBody\":\"b\"}\n";
        let reviews = read_reviews(Cursor::new(jsonl), DatasetFormat::JsonLines).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].location, "LA");
    }

    #[test]
    fn test_format_inferred_from_extension() {
        let cfg = |p: &str, f: Option<&str>| DatasetConfig {
            path: p.into(),
            format: f.map(str::to_string),
        };
        assert_eq!(DatasetFormat::resolve(&cfg("r.csv", None)).unwrap(), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::resolve(&cfg("r.JSON", None)).unwrap(), DatasetFormat::Json);
        assert_eq!(
            DatasetFormat::resolve(&cfg("r.jsonl", None)).unwrap(),
            DatasetFormat::JsonLines
        );
        assert_eq!(
            DatasetFormat::resolve(&cfg("r.txt", Some("json"))).unwrap(),
            DatasetFormat::Json
        );
        assert!(DatasetFormat::resolve(&cfg("r.txt", None)).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reviews.csv");
        std::fs::write(&path, CSV).unwrap();
        let reviews = load_reviews_from_path(&path).unwrap();
        assert_eq!(reviews.len(), 2);

        let err = load_reviews_from_path(&tmp.path().join("missing.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open dataset"));
    }
}
