use std::cmp::min;

use tracing::info;

use crate::fetch::LoadState;
use crate::models::{AuthorFilter, BookSummary, WorkDetail};
use crate::stats::{apply_filter, author_options};

use super::controls::{step_option, QueryInput};

/// Rows rendered in the results table.
pub(crate) const MAX_ROWS: usize = 50;

/// Which dashboard control receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Query,
    Author,
    Results,
}

impl Focus {
    pub(crate) fn next(self) -> Self {
        match self {
            Focus::Query => Focus::Author,
            Focus::Author => Focus::Results,
            Focus::Results => Focus::Query,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Focus::Query => Focus::Results,
            Focus::Author => Focus::Query,
            Focus::Results => Focus::Author,
        }
    }
}

/// Where the dashboard is in its fetch cycle. Data lives next to it in
/// `DashboardScreen::books` so the cards keep their numbers while a newer
/// search is loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListStatus {
    Loading,
    Loaded,
    Failed(String),
}

/// State owned by the list view: the query, the author filter and the last
/// successful result set.
pub(crate) struct DashboardScreen {
    pub(crate) query: QueryInput,
    pub(crate) filter: AuthorFilter,
    pub(crate) books: Vec<BookSummary>,
    pub(crate) status: ListStatus,
    pub(crate) focus: Focus,
    pub(crate) selected: usize,
}

impl DashboardScreen {
    pub(crate) fn new(query: impl Into<String>) -> Self {
        Self {
            query: QueryInput::new(query),
            filter: AuthorFilter::All,
            books: Vec::new(),
            status: ListStatus::Loading,
            focus: Focus::Query,
            selected: 0,
        }
    }

    pub(crate) fn begin_loading(&mut self) {
        self.status = ListStatus::Loading;
    }

    /// Replace the result set after a successful search.
    pub(crate) fn apply_results(&mut self, books: Vec<BookSummary>) {
        self.books = books;
        self.status = ListStatus::Loaded;

        if let AuthorFilter::Author(name) = &self.filter {
            if !self.books.iter().any(|book| book.has_author(name)) {
                info!(author = %name, "author filter no longer matches; resetting");
                self.filter = AuthorFilter::All;
            }
        }
        self.selected = 0;
        self.ensure_in_bounds();
    }

    /// A failed search never leaves the previous results on screen.
    pub(crate) fn apply_error(&mut self, message: String) {
        self.books.clear();
        self.status = ListStatus::Failed(message);
        self.selected = 0;
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub(crate) fn error(&self) -> Option<&str> {
        match &self.status {
            ListStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn author_options(&self) -> Vec<AuthorFilter> {
        author_options(&self.books)
    }

    pub(crate) fn filtered(&self) -> Vec<&BookSummary> {
        apply_filter(&self.books, &self.filter)
    }

    /// The rows the table shows: the filtered set capped at [`MAX_ROWS`].
    pub(crate) fn visible_rows(&self) -> Vec<&BookSummary> {
        let mut rows = self.filtered();
        rows.truncate(MAX_ROWS);
        rows
    }

    pub(crate) fn step_author(&mut self, delta: isize) {
        let options = self.author_options();
        self.filter = step_option(&options, &self.filter, delta);
        self.selected = 0;
    }

    pub(crate) fn selected_book(&self) -> Option<&BookSummary> {
        self.visible_rows().get(self.selected).copied()
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        let next = (current + offset).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible_rows().len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        let len = self.visible_rows().len();
        self.selected = if len == 0 { 0 } else { min(self.selected, len - 1) };
    }
}

/// State owned by the detail view for one work id.
pub(crate) struct DetailScreen {
    pub(crate) work_id: String,
    pub(crate) state: LoadState<WorkDetail>,
    pub(crate) scroll: u16,
}

impl DetailScreen {
    pub(crate) fn loading(work_id: impl Into<String>) -> Self {
        Self {
            work_id: work_id.into(),
            state: LoadState::Loading,
            scroll: 0,
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).max(0);
        self.scroll = next.min(u16::MAX as i32) as u16;
    }
}
