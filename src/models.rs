//! Domain models produced by the normalizer and consumed by the aggregator and
//! the TUI. These stay plain data holders: nothing here talks to the network
//! and nothing mutates a record after it has been normalized.

use std::fmt;

/// Display value used at the presentation boundary whenever data is missing.
pub const MISSING: &str = "—";

/// Label used by the author selector for "no filter".
pub const ALL_AUTHORS: &str = "All";

/// One search hit, reduced to the fields the dashboard cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Opaque catalog key such as `/works/OL82563W`. Unique within a result set.
    pub key: String,
    pub title: Option<String>,
    /// Author names in the order the catalog lists them.
    pub author_names: Vec<String>,
    /// First publication year. `None` when the catalog has no usable year.
    pub year: Option<i32>,
    /// Numeric cover id used to derive thumbnail URLs.
    pub cover_ref: Option<u64>,
    pub subjects: Vec<String>,
}

impl BookSummary {
    /// Title for display, falling back to `Untitled`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// Comma separated author list, or the missing-data marker.
    pub fn display_authors(&self) -> String {
        if self.author_names.is_empty() {
            MISSING.to_string()
        } else {
            self.author_names.join(", ")
        }
    }

    pub fn display_year(&self) -> String {
        self.year
            .map(|year| year.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }

    /// The first `limit` subjects joined for a table cell.
    pub fn display_subjects(&self, limit: usize) -> String {
        join_or_missing(self.subjects.iter().take(limit))
    }

    /// Whether the record's author list names `author` exactly.
    pub fn has_author(&self, author: &str) -> bool {
        self.author_names.iter().any(|name| name == author)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
}

/// Extra information about a single work, fetched each time the detail route
/// is visited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkDetail {
    pub title: Option<String>,
    /// Plain description text. Object-shaped descriptions are unwrapped by the
    /// normalizer, so this is always a string when present.
    pub description: Option<String>,
    pub subjects: Vec<String>,
    pub excerpts: Vec<Excerpt>,
}

impl WorkDetail {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Untitled")
    }

    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(MISSING)
    }

    pub fn display_subjects(&self, limit: usize) -> String {
        join_or_missing(self.subjects.iter().take(limit))
    }
}

/// Active author filter. The sentinel label only exists at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorFilter {
    #[default]
    All,
    Author(String),
}

impl AuthorFilter {
    pub fn matches(&self, book: &BookSummary) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Author(name) => book.has_author(name),
        }
    }
}

impl fmt::Display for AuthorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorFilter::All => write!(f, "{ALL_AUTHORS}"),
            AuthorFilter::Author(name) => write!(f, "{name}"),
        }
    }
}

/// Earliest, latest and mean publication year. The three values only exist
/// together: either at least one year was present or none were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub earliest: i32,
    pub latest: i32,
    pub average: i32,
}

/// Summary numbers rendered on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub years: Option<YearSpan>,
    pub top_author: Option<String>,
}

impl Stats {
    pub fn earliest_label(&self) -> String {
        year_label(self.years.map(|span| span.earliest))
    }

    pub fn latest_label(&self) -> String {
        year_label(self.years.map(|span| span.latest))
    }

    pub fn average_label(&self) -> String {
        year_label(self.years.map(|span| span.average))
    }

    pub fn top_author_label(&self) -> String {
        self.top_author
            .clone()
            .unwrap_or_else(|| MISSING.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeBucket {
    /// Year floored to a multiple of ten, e.g. 1987 lands in 1980.
    pub decade: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFrequency {
    pub name: String,
    pub count: usize,
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn join_or_missing<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        MISSING.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: Option<&str>, authors: &[&str]) -> BookSummary {
        BookSummary {
            key: "/works/OL1W".to_string(),
            title: title.map(str::to_string),
            author_names: authors.iter().map(|a| a.to_string()).collect(),
            year: None,
            cover_ref: None,
            subjects: Vec::new(),
        }
    }

    #[test]
    fn missing_fields_render_as_markers() {
        let summary = book(None, &[]);
        assert_eq!(summary.display_title(), "Untitled");
        assert_eq!(summary.display_authors(), MISSING);
        assert_eq!(summary.display_year(), MISSING);
        assert_eq!(summary.display_subjects(3), MISSING);
    }

    #[test]
    fn empty_stats_use_marker_for_every_year_card() {
        let stats = Stats::default();
        assert_eq!(stats.earliest_label(), MISSING);
        assert_eq!(stats.latest_label(), MISSING);
        assert_eq!(stats.average_label(), MISSING);
        assert_eq!(stats.top_author_label(), MISSING);
    }

    #[test]
    fn author_filter_matches_exact_names_only() {
        let summary = book(Some("Dune"), &["Frank Herbert"]);
        assert!(AuthorFilter::All.matches(&summary));
        assert!(AuthorFilter::Author("Frank Herbert".into()).matches(&summary));
        assert!(!AuthorFilter::Author("frank herbert".into()).matches(&summary));
        assert_eq!(AuthorFilter::All.to_string(), ALL_AUTHORS);
    }
}
