//! Navigation between the dashboard, detail and about views.
//!
//! The open project is encoded in the `p` query parameter of the current
//! location, so a location string alone is enough to reopen a project on the
//! next launch. Location changes are pushed onto a history list instead of
//! reloading anything.

use url::Url;

use crate::models::Numeric;

/// Query parameter that carries the open project id
pub const PROJECT_PARAM: &str = "p";

/// Base used to resolve bare query locations such as `?p=7`
pub const DEFAULT_BASE: &str = "http://localhost/";

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Detail,
    About,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Detail => "Project",
            View::About => "About",
        }
    }
}

/// Resolve a location argument: either a full URL or a query/path relative
/// to [`DEFAULT_BASE`].
pub fn resolve_location(input: &str) -> Result<Url, url::ParseError> {
    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(DEFAULT_BASE)?.join(input),
        Err(e) => Err(e),
    }
}

/// Current view plus the location history
#[derive(Debug, Clone)]
pub struct Navigator {
    view: View,
    location: Url,
    history: Vec<Url>,
}

impl Navigator {
    pub fn new(location: Url) -> Self {
        Self {
            view: View::Dashboard,
            location,
            history: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Locations pushed during this session, oldest first
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Raw `p` parameter of the current location, parsed as an integer
    pub fn project_param(&self) -> Option<Numeric> {
        self.location
            .query_pairs()
            .find(|(key, _)| key == PROJECT_PARAM)
            .map(|(_, value)| Numeric::parse(&value))
    }

    /// Show the detail view and push `?p=<id>`
    pub fn open_project(&mut self, id: i64) {
        let mut next = self.location.clone();
        next.set_query(Some(&format!("{}={}", PROJECT_PARAM, id)));
        self.push(next);
        self.view = View::Detail;
    }

    /// Switch the visible view. Returning to the dashboard strips the query
    /// (and with it the project parameter) from the location.
    pub fn show_view(&mut self, target: View) {
        if target == View::Dashboard && self.location.query().is_some() {
            let mut next = self.location.clone();
            next.set_query(None);
            next.set_fragment(None);
            self.push(next);
        }
        self.view = target;
    }

    fn push(&mut self, next: Url) {
        if next == self.location {
            return;
        }
        tracing::debug!(location = %next, "push location");
        self.history.push(std::mem::replace(&mut self.location, next));
    }
}
