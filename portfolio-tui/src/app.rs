//! Application state and event handling.
//!
//! Elm-style: a single [`App`] holds the dataset, the filter state, the
//! navigator and the derived view-models. Every interaction mutates state and
//! then calls [`App::render_all`], which recomputes the skill panel, timeline
//! and project list from the facet engine.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use url::Url;

use crate::api::ApiMessage;
use crate::filter::{filtered_for, Facet, FilterState};
use crate::models::{find_by_id, ProjectRecord};
use crate::navigation::{Navigator, View};
use crate::timeline::TimelineChart;
use crate::views::{project_rows, skill_counts, ProjectDetail, ProjectRow, SkillCount, TimelineSeries};

/// Dashboard pane that receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Search,
    Skills,
    Timeline,
    #[default]
    Projects,
}

impl Pane {
    pub fn next(&self) -> Self {
        match self {
            Pane::Search => Pane::Skills,
            Pane::Skills => Pane::Timeline,
            Pane::Timeline => Pane::Projects,
            Pane::Projects => Pane::Search,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Pane::Search => Pane::Projects,
            Pane::Skills => Pane::Search,
            Pane::Timeline => Pane::Skills,
            Pane::Projects => Pane::Timeline,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pane::Search => "Search",
            Pane::Skills => "Skills",
            Pane::Timeline => "Timeline",
            Pane::Projects => "Projects",
        }
    }
}

/// Log entry for the message area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogEntry {
    fn with_level(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Warning, message)
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Full dataset, read-only once loaded
    pub records: Vec<ProjectRecord>,

    pub filter: FilterState,
    pub navigator: Navigator,

    /// Chart handle, created on the first full render
    pub chart: Option<TimelineChart>,

    // Derived view-models, rebuilt by render_all
    pub skills: Vec<SkillCount>,
    pub rows: Vec<ProjectRow>,
    pub detail: Option<ProjectDetail>,

    pub focus: Pane,
    pub skill_selected: usize,
    pub list_selected: usize,
    pub detail_scroll: u16,

    pub logs: Vec<LogEntry>,
    max_logs: usize,

    /// Whether the dataset is still being fetched
    pub is_loading: bool,
    pub loaded_at: Option<DateTime<Local>>,
    /// Set when the fallback dataset is shown
    pub offline_reason: Option<String>,
    /// Short description of the data source
    pub source_label: String,

    pub show_help: bool,

    /// The location's project parameter is honored once, after the first render
    deep_link_pending: bool,
}

impl App {
    pub fn new(location: Url, source_label: impl Into<String>) -> Self {
        let source_label = source_label.into();
        let mut app = Self {
            should_quit: false,
            records: Vec::new(),
            filter: FilterState::new(),
            navigator: Navigator::new(location),
            chart: None,
            skills: Vec::new(),
            rows: Vec::new(),
            detail: None,
            focus: Pane::default(),
            skill_selected: 0,
            list_selected: 0,
            detail_scroll: 0,
            logs: Vec::new(),
            max_logs: 100,
            is_loading: true,
            loaded_at: None,
            offline_reason: None,
            source_label,
            show_help: false,
            deep_link_pending: true,
        };

        app.log(LogEntry::info("Portfolio dashboard initialized"));
        let msg = format!("Loading {}...", app.source_label);
        app.log(LogEntry::info(msg));
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn view(&self) -> View {
        self.navigator.view()
    }

    /// Handle messages from the loader
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::DatasetLoaded(loaded) => {
                match &loaded.fallback_reason {
                    Some(reason) => {
                        self.log(LogEntry::warning(format!("Sheet unavailable: {}", reason)));
                        self.log(LogEntry::warning("Showing offline placeholder"));
                    }
                    None => {
                        self.log(LogEntry::success(format!("Loaded {} projects", loaded.records.len())));
                    }
                }
                self.offline_reason = loaded.fallback_reason;
                self.load_records(loaded.records);
            }
        }
    }

    /// Install the dataset and run the first full render
    pub fn load_records(&mut self, records: Vec<ProjectRecord>) {
        self.records = records;
        self.is_loading = false;
        self.loaded_at = Some(Local::now());
        self.render_all();
    }

    /// Recompute every dashboard view from the facet engine.
    ///
    /// The first call also opens the project named by the location, if any.
    pub fn render_all(&mut self) {
        let skill_records = filtered_for(Facet::Skills, &self.records, &self.filter);
        self.skills = skill_counts(&skill_records, &self.filter);

        let timeline_records = filtered_for(Facet::Timeline, &self.records, &self.filter);
        let series = TimelineSeries::build(&self.records, &timeline_records, &self.filter);
        match self.chart.as_mut() {
            Some(chart) => {
                chart.update(series);
                tracing::trace!(revision = chart.revision(), "timeline updated");
            }
            None => self.chart = Some(TimelineChart::create(series)),
        }

        let list_records = filtered_for(Facet::List, &self.records, &self.filter);
        self.rows = project_rows(&list_records);

        self.skill_selected = clamp_index(self.skill_selected, self.skills.len());
        self.list_selected = clamp_index(self.list_selected, self.rows.len());

        if self.deep_link_pending {
            self.deep_link_pending = false;
            if let Some(id) = self.navigator.project_param().and_then(|p| p.value()) {
                tracing::info!(id, "opening deep-linked project");
                self.open_project(id);
            }
        }
    }

    // ============================================
    // Filter mutations
    // ============================================

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.set_search(term);
        self.list_selected = 0;
        self.render_all();
    }

    pub fn toggle_skill(&mut self, tag: &str) {
        self.filter.toggle_skill(tag);
        tracing::debug!(skill = ?self.filter.active_skill, "skill facet changed");
        self.render_all();
    }

    /// Chart click callback: toggle the year of the point at `index`
    pub fn on_timeline_click(&mut self, index: usize) {
        let Some(year) = self.chart.as_ref().and_then(|c| c.year_at(index)) else {
            return;
        };
        self.filter.toggle_year(year);
        tracing::debug!(year = ?self.filter.active_year, "year facet changed");
        self.render_all();
    }

    pub fn clear_filters(&mut self) {
        if !self.filter.is_active() {
            return;
        }
        self.filter.clear();
        self.log(LogEntry::info("Filters cleared"));
        self.render_all();
    }

    // ============================================
    // Navigation
    // ============================================

    /// Open the detail view for `id`. Unknown ids leave everything unchanged.
    pub fn open_project(&mut self, id: i64) -> bool {
        let Some(record) = find_by_id(&self.records, id) else {
            tracing::debug!(id, "no project with this id");
            return false;
        };
        self.detail = Some(ProjectDetail::new(id, record));
        self.detail_scroll = 0;
        self.navigator.open_project(id);
        true
    }

    /// Back to the dashboard
    pub fn close_project(&mut self) {
        self.show_view(View::Dashboard);
    }

    pub fn show_view(&mut self, target: View) {
        self.navigator.show_view(target);
        if target == View::Dashboard {
            self.detail = None;
        }
    }

    // ============================================
    // Input
    // ============================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        match self.view() {
            View::Dashboard if self.focus == Pane::Search => self.handle_search_key(key),
            View::Dashboard => self.handle_dashboard_key(key),
            View::Detail => self.handle_detail_key(key),
            View::About => self.handle_about_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                self.focus = Pane::Skills;
            }
            KeyCode::BackTab => {
                self.focus = Pane::Projects;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.set_search("");
            }
            KeyCode::Backspace => {
                let mut term = self.filter.search_term.clone();
                if term.pop().is_some() {
                    self.set_search(term);
                }
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let term = format!("{}{}", self.filter.search_term, c);
                self.set_search(term);
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('/') => {
                self.focus = Pane::Search;
                return;
            }
            KeyCode::Char('x') => {
                self.clear_filters();
                return;
            }
            KeyCode::Char('a') => {
                self.show_view(View::About);
                return;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return;
            }
            _ => {}
        }

        match self.focus {
            Pane::Skills => self.handle_skills_key(key),
            Pane::Timeline => self.handle_timeline_key(key),
            Pane::Projects => self.handle_list_key(key),
            Pane::Search => {}
        }
    }

    fn handle_skills_key(&mut self, key: KeyEvent) {
        let total = self.skills.len();
        if total == 0 {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.skill_selected = (self.skill_selected + 1) % total;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.skill_selected = self.skill_selected.checked_sub(1).unwrap_or(total - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(tag) = self.skills.get(self.skill_selected).map(|s| s.tag.clone()) {
                    self.toggle_skill(&tag);
                    // keep the cursor on the same tag after the panel re-sorts
                    if let Some(pos) = self.skills.iter().position(|s| s.tag == tag) {
                        self.skill_selected = pos;
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_timeline_key(&mut self, key: KeyEvent) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => chart.cursor_left(),
            KeyCode::Char('l') | KeyCode::Right => chart.cursor_right(),
            KeyCode::Home => chart.cursor_first(),
            KeyCode::End => chart.cursor_last(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let index = chart.cursor();
                self.on_timeline_click(index);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let total = self.rows.len();
        if total == 0 {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_selected = (self.list_selected + 1) % total;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_selected = self.list_selected.checked_sub(1).unwrap_or(total - 1);
            }
            KeyCode::Char('g') => {
                self.list_selected = 0;
            }
            KeyCode::Char('G') => {
                self.list_selected = total - 1;
            }
            KeyCode::Enter => {
                if let Some(id) = self.rows.get(self.list_selected).and_then(|r| r.id) {
                    self.open_project(id);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.close_project();
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('a') => {
                self.show_view(View::Dashboard);
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let state = if self.is_loading {
            "Loading...".to_string()
        } else if self.offline_reason.is_some() {
            "Offline".to_string()
        } else {
            let at = self
                .loaded_at
                .map(|t| format!(" at {}", t.format("%H:%M")))
                .unwrap_or_default();
            format!("{} projects{}", self.records.len(), at)
        };

        format!(
            "{} | {} | {} | ?: Help | /: Search | x: Clear | q: Quit",
            state,
            self.filter.summary(),
            self.navigator.location()
        )
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
