//! View-models for the dashboard panes.
//!
//! Each builder is a pure function from filtered records (and the filter
//! state) to a plain structure. `ui.rs` and `timeline.rs` only draw these.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::filter::FilterState;
use crate::models::ProjectRecord;

/// One entry of the skill panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCount {
    pub tag: String,
    pub count: usize,
    pub active: bool,
}

/// Tag frequencies, most used first.
///
/// Every occurrence counts, including repeats inside one record. Ties keep the
/// order in which the tags were first seen. Empty tags are skipped.
pub fn skill_counts(records: &[&ProjectRecord], state: &FilterState) -> Vec<SkillCount> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in records.iter().flat_map(|r| r.tags.iter()) {
        if tag.is_empty() {
            continue;
        }
        match index.get(tag.as_str()) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(tag.as_str(), order.len());
                order.push((tag.clone(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .map(|(tag, count)| SkillCount {
            active: state.active_skill.as_deref() == Some(tag.as_str()),
            tag,
            count,
        })
        .collect()
}

/// Widest span, in years, the timeline axis may cover
pub const MAX_TIMELINE_YEARS: i64 = 100;

/// Years outside this range never get a point on the axis
const CALENDAR_YEARS: RangeInclusive<i64> = 1..=9999;

/// Dense per-year series for the timeline chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineSeries {
    pub years: Vec<i64>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Index of the active year's point, when it is on the axis
    pub active_index: Option<usize>,
}

impl TimelineSeries {
    /// Build the series.
    ///
    /// The axis comes from [`timeline_axis`] over the whole dataset so it does
    /// not move while filters change; counts come from `filtered`. Years off
    /// the axis are not counted.
    pub fn build(
        all: &[ProjectRecord],
        filtered: &[&ProjectRecord],
        state: &FilterState,
    ) -> Self {
        let Some((min_year, max_year)) = timeline_axis(all) else {
            return Self::default();
        };

        let years: Vec<i64> = (min_year..=max_year).collect();
        let mut values = vec![0u64; years.len()];
        for year in filtered.iter().filter_map(|r| r.year.value()) {
            if (min_year..=max_year).contains(&year) {
                values[(year - min_year) as usize] += 1;
            }
        }

        let active_index = state
            .active_year
            .filter(|year| (min_year..=max_year).contains(year))
            .map(|year| (year - min_year) as usize);

        Self {
            labels: years.iter().map(|y| y.to_string()).collect(),
            years,
            values,
            active_index,
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Year of the point at `index`
    pub fn year_at(&self, index: usize) -> Option<i64> {
        self.years.get(index).copied()
    }

    /// Largest count in the series (at least 1, for axis bounds)
    pub fn peak(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0).max(1)
    }
}

/// First and last year of the timeline axis.
///
/// Only calendar years count. The axis is the window of at most
/// [`MAX_TIMELINE_YEARS`] years holding the most records; on a tie the later
/// window wins. Years outside it (a date typed into the year column, say)
/// are left off the chart like invalid years.
pub fn timeline_axis(records: &[ProjectRecord]) -> Option<(i64, i64)> {
    let mut years: Vec<i64> = records
        .iter()
        .filter_map(|r| r.year.value())
        .filter(|year| CALENDAR_YEARS.contains(year))
        .collect();
    years.sort_unstable();

    let mut best: Option<(usize, usize)> = None;
    let mut start = 0;
    for end in 0..years.len() {
        while years[end] - years[start] >= MAX_TIMELINE_YEARS {
            start += 1;
        }
        if best.map_or(true, |(s, e)| end - start >= e - s) {
            best = Some((start, end));
        }
    }

    best.map(|(s, e)| (years[s], years[e]))
}

/// Smallest and largest valid year in the dataset
pub fn year_range(records: &[ProjectRecord]) -> Option<(i64, i64)> {
    let mut years = records.iter().filter_map(|r| r.year.value());
    let first = years.next()?;
    Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
}

/// One row of the project list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    /// `None` when the id column did not parse; such rows cannot be opened
    pub id: Option<i64>,
    pub name: String,
    pub year: String,
    pub tags: String,
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id.value(),
            name: record.name.clone(),
            year: record.year.to_string(),
            tags: record.tag_line(),
        }
    }
}

pub fn project_rows(records: &[&ProjectRecord]) -> Vec<ProjectRow> {
    records.iter().map(|r| ProjectRow::from(*r)).collect()
}

/// Everything the detail view shows for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    pub id: i64,
    pub name: String,
    pub year: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl ProjectDetail {
    pub fn new(id: i64, record: &ProjectRecord) -> Self {
        Self {
            id,
            name: record.name.clone(),
            year: record.year.to_string(),
            tags: record.tags.clone(),
            description: record.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filtered_for, Facet};
    use crate::models::Numeric;
    use pretty_assertions::assert_eq;

    fn record(id: i64, year: i64, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id: Numeric::Value(id),
            name: format!("project-{}", id),
            year: Numeric::Value(year),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: format!("about {}", id),
        }
    }

    #[test]
    fn test_skill_counts_sorted_with_stable_ties() {
        let data = vec![
            record(1, 2020, &["Go", "Rust"]),
            record(2, 2020, &["Rust", "SQL"]),
            record(3, 2021, &["SQL", "Dart"]),
        ];
        let refs: Vec<_> = data.iter().collect();
        let counts = skill_counts(&refs, &FilterState::new());

        let pairs: Vec<_> = counts.iter().map(|c| (c.tag.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Rust", 2), ("SQL", 2), ("Go", 1), ("Dart", 1)]);
    }

    #[test]
    fn test_skill_counts_include_duplicates_and_mark_active() {
        let data = vec![record(1, 2020, &["Go", "Go", ""]), record(2, 2020, &["Rust"])];
        let refs: Vec<_> = data.iter().collect();
        let mut state = FilterState::new();
        state.toggle_skill("Rust");

        let counts = skill_counts(&refs, &state);
        assert_eq!(
            counts,
            vec![
                SkillCount { tag: "Go".into(), count: 2, active: false },
                SkillCount { tag: "Rust".into(), count: 1, active: true },
            ]
        );
    }

    #[test]
    fn test_timeline_is_dense_over_gaps() {
        let data = vec![record(1, 2018, &["x"]), record(2, 2021, &["y"])];
        let refs: Vec<_> = data.iter().collect();
        let series = TimelineSeries::build(&data, &refs, &FilterState::new());

        assert_eq!(series.labels, vec!["2018", "2019", "2020", "2021"]);
        assert_eq!(series.values, vec![1, 0, 0, 1]);
        assert_eq!(series.active_index, None);
    }

    #[test]
    fn test_timeline_axis_is_stable_under_filters() {
        let data = vec![
            record(1, 2018, &["Go"]),
            record(2, 2020, &["Rust"]),
            record(3, 2021, &["Go"]),
        ];
        let mut state = FilterState::new();
        state.toggle_skill("Rust");
        state.toggle_year(2020);

        let filtered = filtered_for(Facet::Timeline, &data, &state);
        let series = TimelineSeries::build(&data, &filtered, &state);

        assert_eq!(series.years, vec![2018, 2019, 2020, 2021]);
        assert_eq!(series.values, vec![0, 0, 1, 0]);
        assert_eq!(series.active_index, Some(2));
        assert_eq!(series.year_at(2), Some(2020));
        assert_eq!(series.peak(), 1);
    }

    #[test]
    fn test_timeline_ignores_invalid_years() {
        let mut broken = record(3, 0, &["x"]);
        broken.year = Numeric::parse("later");
        let data = vec![record(1, 2020, &["x"]), broken];
        let refs: Vec<_> = data.iter().collect();

        let series = TimelineSeries::build(&data, &refs, &FilterState::new());
        assert_eq!(series.years, vec![2020]);
        assert_eq!(series.values, vec![1]);
    }

    #[test]
    fn test_timeline_leaves_outlier_years_off_the_axis() {
        let data = vec![
            record(1, 2020, &["Rust"]),
            record(2, 20200101, &["Go"]),
            record(3, 99_999_999_999, &["Go"]),
        ];
        let refs: Vec<_> = data.iter().collect();
        let series = TimelineSeries::build(&data, &refs, &FilterState::new());

        assert_eq!(series.years, vec![2020]);
        assert_eq!(series.values, vec![1]);

        // still listed with the year as typed
        let rows = project_rows(&refs);
        assert_eq!(rows[1].year, "20200101");
    }

    #[test]
    fn test_timeline_axis_keeps_densest_window() {
        let data = vec![
            record(1, 1890, &["x"]),
            record(2, 2019, &["x"]),
            record(3, 2021, &["x"]),
        ];
        assert_eq!(timeline_axis(&data), Some((2019, 2021)));

        let spread = vec![record(1, 1900, &["x"]), record(2, 2100, &["x"])];
        assert_eq!(timeline_axis(&spread), Some((2100, 2100)));

        let wide = vec![record(1, 2000, &["x"]), record(2, 2000 + MAX_TIMELINE_YEARS - 1, &["x"])];
        let series = TimelineSeries::build(&wide, &wide.iter().collect::<Vec<_>>(), &FilterState::new());
        assert_eq!(series.len(), MAX_TIMELINE_YEARS as usize);
    }

    #[test]
    fn test_timeline_empty_without_years() {
        let series = TimelineSeries::build(&[], &[], &FilterState::new());
        assert!(series.is_empty());
        assert_eq!(series.year_at(0), None);
        assert_eq!(series.peak(), 1);
    }

    #[test]
    fn test_project_row_and_detail() {
        let data = record(7, 2022, &["Rust", "TUI"]);
        let row = ProjectRow::from(&data);
        assert_eq!(row.id, Some(7));
        assert_eq!(row.year, "2022");
        assert_eq!(row.tags, "#Rust #TUI");

        let detail = ProjectDetail::new(7, &data);
        assert_eq!(detail.name, "project-7");
        assert_eq!(detail.description, "about 7");
    }
}
