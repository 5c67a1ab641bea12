//! Two-route navigation: the dashboard at `/` and a work's detail page at
//! `/book/{workId}`. The router only tracks where we are and where we came
//! from; screens decide what to fetch when a route becomes active.

use std::fmt;

use tracing::debug;

use crate::catalog::work_id_from_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Book { work_id: String },
}

impl Route {
    /// Detail route for a catalog key such as `/works/OL82563W`.
    pub fn for_catalog_key(key: &str) -> Option<Self> {
        work_id_from_key(key).map(|work_id| Route::Book {
            work_id: work_id.to_string(),
        })
    }

    /// Parse a path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Some(Route::Dashboard);
        }

        let mut segments = trimmed.trim_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("book"), Some(work_id), None) if !work_id.is_empty() => Some(Route::Book {
                work_id: work_id.to_string(),
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Book { work_id } => format!("/book/{work_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the history needed for "back".
#[derive(Debug)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::Dashboard,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Move to `route`. Navigating to the route we are already on is a no-op
    /// and returns `false`.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        debug!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        true
    }

    /// Return to the previous route. From the detail page with no history the
    /// dashboard is the natural parent.
    pub fn back(&mut self) -> Option<&Route> {
        let target = match self.history.pop() {
            Some(route) => route,
            None if self.current != Route::Dashboard => Route::Dashboard,
            None => return None,
        };
        debug!(from = %self.current, to = %target, "back");
        self.current = target;
        Some(&self.current)
    }
}
