//! CSV parsing for the published portfolio sheet.
//!
//! The sheet export is loose CSV: a header row, then rows of five logical
//! columns (`id, name, year, tags, description`). Commas inside a quoted span
//! do not split fields. Doubled quotes are not treated as escapes.

use crate::models::{Numeric, ProjectRecord};

/// Minimum number of fields a row needs to become a record
pub const MIN_FIELDS: usize = 5;

/// Parse the whole sheet. The first line is always treated as the header.
///
/// Short rows are dropped without error; output order follows input order.
pub fn parse(raw: &str) -> Vec<ProjectRecord> {
    raw.split(['\r', '\n'])
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_row)
        .collect()
}

/// Parse one data line, or `None` when it has too few fields
pub fn parse_row(line: &str) -> Option<ProjectRecord> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(ProjectRecord {
        id: Numeric::parse(&strip_quotes(fields[0])),
        name: strip_quotes(fields[1]),
        year: Numeric::parse(&strip_quotes(fields[2])),
        tags: split_tags(fields[3]),
        description: strip_quotes(fields[4]).replace("\\n", "\n"),
    })
}

/// Split a line on commas that sit outside a `"..."` span.
///
/// Fields are returned raw, quotes included.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Tag column: quotes removed, then one tag per comma, each trimmed
pub fn split_tags(raw: &str) -> Vec<String> {
    strip_quotes(raw)
        .split(',')
        .map(|t| t.trim().to_string())
        .collect()
}

fn strip_quotes(field: &str) -> String {
    field.replace('"', "")
}
