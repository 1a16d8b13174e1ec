//! Core data models: book records, the sortable/searchable field set, and
//! match results produced by the fuzzy matcher.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Publisher value used when the source has none for a record.
pub const DEFAULT_PUBLISHER: &str = "-";

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book identifier. Expected unique, not enforced.
    pub code: String,
    pub title: String,
    pub author: String,
    /// Defaults to [`DEFAULT_PUBLISHER`] when the source omits it.
    pub publisher: String,
}

impl BookRecord {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: Option<&str>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            author: author.into(),
            publisher: publisher.unwrap_or(DEFAULT_PUBLISHER).to_string(),
        }
    }

    /// Raw (un-normalized) text of the given field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Code => &self.code,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Publisher => &self.publisher,
        }
    }
}

/// The fixed set of record fields that can be sorted on or searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Code,
    Title,
    Author,
    Publisher,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Code, Field::Title, Field::Author, Field::Publisher];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Title => "title",
            Field::Author => "author",
            Field::Publisher => "publisher",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    /// Accepts the canonical names case-insensitively, plus the column
    /// headers used by the library's CSV exports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "code" | "kode_buku" => Ok(Field::Code),
            "title" | "nama_buku" => Ok(Field::Title),
            "author" | "penulis_buku" => Ok(Field::Author),
            "publisher" | "penerbit_buku" => Ok(Field::Publisher),
            other => bail!(
                "Unknown field: '{}'. Use code, title, author, or publisher.",
                other
            ),
        }
    }
}

/// A record accepted by the fuzzy matcher, with its total edit-distance score.
///
/// Lower scores are closer matches; `0.0` means every query token matched a
/// target token exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub code: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub score: f64,
}

impl MatchResult {
    pub fn from_record(record: &BookRecord, score: f64) -> Self {
        Self {
            code: record.code.clone(),
            title: record.title.clone(),
            author: record.author.clone(),
            publisher: record.publisher.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_publisher_defaults_to_dash() {
        let rec = BookRecord::new("B1", "Sistem Operasi", "Tanenbaum", None);
        assert_eq!(rec.publisher, "-");
        assert_eq!(rec.field(Field::Publisher), DEFAULT_PUBLISHER);
    }

    #[test]
    fn test_field_accessor() {
        let rec = BookRecord::new("B7", "Basis Data", "Date", Some("Erlangga"));
        assert_eq!(rec.field(Field::Code), "B7");
        assert_eq!(rec.field(Field::Title), "Basis Data");
        assert_eq!(rec.field(Field::Author), "Date");
        assert_eq!(rec.field(Field::Publisher), "Erlangga");
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("Title".parse::<Field>().unwrap(), Field::Title);
        assert_eq!(" author ".parse::<Field>().unwrap(), Field::Author);
        assert_eq!("penerbit_buku".parse::<Field>().unwrap(), Field::Publisher);
        assert_eq!("kode_buku".parse::<Field>().unwrap(), Field::Code);
    }

    #[test]
    fn test_field_parse_unknown() {
        let err = "isbn".parse::<Field>().unwrap_err();
        assert!(err.to_string().contains("Unknown field"));
    }

    #[test]
    fn test_field_display_roundtrips() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_match_result_serializes_flat() {
        let rec = BookRecord::new("B1", "Sistem Operasi", "Tanenbaum", None);
        let json = serde_json::to_value(MatchResult::from_record(&rec, 1.0)).unwrap();
        assert_eq!(json["code"], "B1");
        assert_eq!(json["publisher"], "-");
        assert_eq!(json["score"], 1.0);
    }
}
