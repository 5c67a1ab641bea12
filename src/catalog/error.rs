use thiserror::Error;

/// Everything that can go wrong while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16 },
    /// The request never completed or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The body arrived but was not the JSON we expected.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Collapse the error into the single line shown in the status region.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Http { status } => format!("HTTP {status}"),
            CatalogError::Transport(_) => "Failed to fetch data.".to_string(),
            CatalogError::Parse(_) => "Malformed response.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_surface_the_status_code() {
        let err = CatalogError::Http { status: 500 };
        assert_eq!(err.user_message(), "HTTP 500");
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn parse_errors_use_a_generic_message() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = CatalogError::from(source);
        assert_eq!(err.user_message(), "Malformed response.");
    }
}
