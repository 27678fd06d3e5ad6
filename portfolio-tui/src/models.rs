//! Domain models for the portfolio dataset.
//!
//! A dataset is a read-only sequence of [`ProjectRecord`]s produced by the
//! CSV parser. Integer columns come from an uncontrolled spreadsheet, so they
//! are kept as [`Numeric`] values that remember unparseable input instead of
//! failing the row.

use serde::Serialize;

/// Integer column value as read from the sheet.
///
/// `Invalid` is the sentinel for text without a leading integer. It never
/// compares equal to a number, so it cannot match an id lookup or a year facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Value(i64),
    Invalid(String),
}

impl Numeric {
    /// Parse with leading-integer semantics: surrounding whitespace is ignored,
    /// an optional sign and a run of digits are read, anything after is dropped.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let (sign, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (-1, &trimmed[1..]),
            Some(b'+') => (1, &trimmed[1..]),
            _ => (1, trimmed),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());

        match digits[..end].parse::<i64>() {
            Ok(value) => Numeric::Value(sign * value),
            Err(_) => Numeric::Invalid(raw.to_string()),
        }
    }

    /// The integer, if the field parsed
    pub fn value(&self) -> Option<i64> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::Invalid(_) => None,
        }
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{}", v),
            Numeric::Invalid(raw) if raw.trim().is_empty() => write!(f, "?"),
            Numeric::Invalid(raw) => write!(f, "{}", raw.trim()),
        }
    }
}

/// One row of the portfolio sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub id: Numeric,
    pub name: String,
    pub year: Numeric,
    /// Ordered, duplicates preserved
    pub tags: Vec<String>,
    pub description: String,
}

impl ProjectRecord {
    /// Whether the record carries this exact id
    pub fn has_id(&self, id: i64) -> bool {
        self.id.value() == Some(id)
    }

    /// Whether the record falls in this year
    pub fn in_year(&self, year: i64) -> bool {
        self.year.value() == Some(year)
    }

    /// Whether any tag matches exactly
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match on the name or any tag.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Tags rendered as `#tag` chips joined by spaces
    pub fn tag_line(&self) -> String {
        self.tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Year shown on the record that replaces an unreachable dataset
pub const FALLBACK_YEAR: i64 = 2026;

/// The single-record dataset used when the sheet cannot be loaded
pub fn fallback_dataset(reason: &str) -> Vec<ProjectRecord> {
    vec![ProjectRecord {
        id: Numeric::Value(0),
        name: "System Offline".to_string(),
        year: Numeric::Value(FALLBACK_YEAR),
        tags: vec!["Error".to_string()],
        description: format!(
            "The dashboard could not load the portfolio sheet.\n{}\nCheck the log file for details.",
            reason
        ),
    }]
}

/// First record with the given id
pub fn find_by_id(records: &[ProjectRecord], id: i64) -> Option<&ProjectRecord> {
    records.iter().find(|r| r.has_id(id))
}
