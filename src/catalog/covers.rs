//! Helpers for the two derived identifiers the dashboard builds itself: cover
//! thumbnail URLs and the work id carried by the detail route.

/// Size token understood by the cover host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn token(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Build `{base}/b/id/{cover}-{size}.jpg`, or `None` when the record has no
/// cover reference. Callers render a textual placeholder for `None` and never
/// issue an image request.
pub fn cover_url(base: &str, cover_ref: Option<u64>, size: CoverSize) -> Option<String> {
    cover_ref.map(|id| {
        format!(
            "{}/b/id/{}-{}.jpg",
            base.trim_end_matches('/'),
            id,
            size.token()
        )
    })
}

/// Trailing path segment of a catalog key: `/works/OL82563W` -> `OL82563W`.
pub fn work_id_from_key(key: &str) -> Option<&str> {
    key.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Public catalog page for a work, used when opening a record in the browser.
pub fn work_page_url(base: &str, work_id: &str) -> String {
    format!("{}/works/{}", base.trim_end_matches('/'), work_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_url_uses_size_token() {
        assert_eq!(
            cover_url("https://covers.openlibrary.org/", Some(12345), CoverSize::Medium).as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg")
        );
        assert_eq!(
            cover_url("https://covers.openlibrary.org", Some(7), CoverSize::Large).as_deref(),
            Some("https://covers.openlibrary.org/b/id/7-L.jpg")
        );
    }

    #[test]
    fn absent_cover_has_no_url() {
        assert_eq!(cover_url("https://covers.openlibrary.org", None, CoverSize::Small), None);
    }

    #[test]
    fn work_id_is_the_trailing_segment() {
        assert_eq!(work_id_from_key("/works/OL82563W"), Some("OL82563W"));
        assert_eq!(work_id_from_key("OL1W"), Some("OL1W"));
        assert_eq!(work_id_from_key(""), None);
    }
}
