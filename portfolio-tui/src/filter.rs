//! Filter state and the facet engine.
//!
//! Three facets constrain the dataset: search text, year and skill. Each view
//! asks for its records through [`filtered_for`], which waives the view's own
//! facet so an active selection never hides the option that would clear it.

use crate::models::ProjectRecord;

/// The view a filtered record set is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    /// Project list: every facet applies
    List,
    /// Skill panel: the skill facet is waived
    Skills,
    /// Timeline: the year facet is waived
    Timeline,
}

/// Current filter selection, owned by the application for the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub active_year: Option<i64>,
    pub active_skill: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Select a skill, or clear it when it is already the active one
    pub fn toggle_skill(&mut self, tag: &str) {
        if self.active_skill.as_deref() == Some(tag) {
            self.active_skill = None;
        } else {
            self.active_skill = Some(tag.to_string());
        }
    }

    /// Select a year, or clear it when it is already the active one
    pub fn toggle_year(&mut self, year: i64) {
        if self.active_year == Some(year) {
            self.active_year = None;
        } else {
            self.active_year = Some(year);
        }
    }

    /// Reset every facet
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any facet currently constrains the dataset
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.active_year.is_some() || self.active_skill.is_some()
    }

    /// Short human summary for the status line
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.search_term.is_empty() {
            parts.push(format!("search \"{}\"", self.search_term));
        }
        if let Some(year) = self.active_year {
            parts.push(format!("year {}", year));
        }
        if let Some(skill) = &self.active_skill {
            parts.push(format!("skill {}", skill));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Records the given view should reflect under the current filters
pub fn filtered_for<'a>(
    facet: Facet,
    records: &'a [ProjectRecord],
    state: &FilterState,
) -> Vec<&'a ProjectRecord> {
    let needle = state.search_term.to_lowercase();

    records
        .iter()
        .filter(|record| record.matches_search(&needle))
        .filter(|record| match (&state.active_skill, facet) {
            (None, _) | (_, Facet::Skills) => true,
            (Some(skill), _) => record.has_tag(skill),
        })
        .filter(|record| match (state.active_year, facet) {
            (None, _) | (_, Facet::Timeline) => true,
            (Some(year), _) => record.in_year(year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Numeric;
    use pretty_assertions::assert_eq;

    fn record(id: i64, name: &str, year: i64, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id: Numeric::Value(id),
            name: name.to_string(),
            year: Numeric::Value(year),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: String::new(),
        }
    }

    fn ids(records: &[&ProjectRecord]) -> Vec<i64> {
        records.iter().filter_map(|r| r.id.value()).collect()
    }

    fn dataset() -> Vec<ProjectRecord> {
        vec![
            record(1, "Ledger", 2020, &["Rust", "SQL"]),
            record(2, "Chartboard", 2021, &["Go"]),
            record(3, "Crawler", 2021, &["Rust", "Go"]),
            record(4, "Notes", 2022, &["Dart"]),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let data = dataset();
        let state = FilterState::new();
        for facet in [Facet::List, Facet::Skills, Facet::Timeline] {
            assert_eq!(ids(&filtered_for(facet, &data, &state)), vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_year_facet_waived_for_timeline_only() {
        let data = vec![record(1, "a", 2020, &["x"]), record(2, "b", 2021, &["y"])];
        let mut state = FilterState::new();
        state.toggle_year(2020);

        assert_eq!(ids(&filtered_for(Facet::Timeline, &data, &state)), vec![1, 2]);
        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), vec![1]);
        assert_eq!(ids(&filtered_for(Facet::Skills, &data, &state)), vec![1]);
    }

    #[test]
    fn test_skill_facet_waived_for_skill_panel_only() {
        let data = dataset();
        let mut state = FilterState::new();
        state.toggle_skill("Go");

        assert_eq!(ids(&filtered_for(Facet::Skills, &data, &state)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), vec![2, 3]);
        assert_eq!(ids(&filtered_for(Facet::Timeline, &data, &state)), vec![2, 3]);
    }

    #[test]
    fn test_search_applies_to_every_view() {
        let data = dataset();
        let mut state = FilterState::new();
        state.set_search("RUST");

        for facet in [Facet::List, Facet::Skills, Facet::Timeline] {
            assert_eq!(ids(&filtered_for(facet, &data, &state)), vec![1, 3]);
        }

        state.set_search("chart");
        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), vec![2]);
    }

    #[test]
    fn test_all_facets_combine_on_list() {
        let data = dataset();
        let mut state = FilterState::new();
        state.set_search("r");
        state.toggle_skill("Rust");
        state.toggle_year(2021);

        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), vec![3]);
        assert_eq!(ids(&filtered_for(Facet::Skills, &data, &state)), vec![2, 3]);
        assert_eq!(ids(&filtered_for(Facet::Timeline, &data, &state)), vec![1, 3]);
    }

    #[test]
    fn test_skill_match_is_exact() {
        let data = vec![record(1, "a", 2020, &["Go"]), record(2, "b", 2020, &["Golang"])];
        let mut state = FilterState::new();
        state.toggle_skill("Go");
        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), vec![1]);
    }

    #[test]
    fn test_toggle_skill_twice_restores_list() {
        let data = dataset();
        let mut state = FilterState::new();
        let before = ids(&filtered_for(Facet::List, &data, &state));

        state.toggle_skill("Go");
        assert_eq!(state.active_skill.as_deref(), Some("Go"));
        state.toggle_skill("Go");

        assert_eq!(state.active_skill, None);
        assert_eq!(ids(&filtered_for(Facet::List, &data, &state)), before);
    }

    #[test]
    fn test_toggle_replaces_other_value() {
        let mut state = FilterState::new();
        state.toggle_year(2020);
        state.toggle_year(2021);
        assert_eq!(state.active_year, Some(2021));

        state.toggle_skill("Go");
        state.toggle_skill("Rust");
        assert_eq!(state.active_skill.as_deref(), Some("Rust"));
    }

    #[test]
    fn test_invalid_year_never_matches_active_year() {
        let mut broken = record(9, "broken", 0, &["x"]);
        broken.year = Numeric::parse("tbd");
        let data = vec![broken];
        let mut state = FilterState::new();
        state.toggle_year(2020);

        assert!(filtered_for(Facet::List, &data, &state).is_empty());
        assert_eq!(filtered_for(Facet::Timeline, &data, &state).len(), 1);
    }

    #[test]
    fn test_clear_and_summary() {
        let mut state = FilterState::new();
        assert!(!state.is_active());
        assert_eq!(state.summary(), "no filters");

        state.set_search("go");
        state.toggle_year(2021);
        state.toggle_skill("Rust");
        assert!(state.is_active());
        assert_eq!(state.summary(), "search \"go\", year 2021, skill Rust");

        state.clear();
        assert_eq!(state, FilterState::default());
    }
}
