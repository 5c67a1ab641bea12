use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".openlibrary-dashboard";

const DEFAULT_API_URL: &str = "https://openlibrary.org";
const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";
/// Query loaded on start so the dashboard has something to show.
const DEFAULT_QUERY: &str = "fantasy";

/// Runtime settings. Everything has a default; the environment (optionally
/// seeded from a `.env` file) can override individual values.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub covers_url: String,
    pub initial_query: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            initial_query: DEFAULT_QUERY.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_url: non_empty("OPENLIBRARY_API_URL").unwrap_or(defaults.api_url),
            covers_url: non_empty("OPENLIBRARY_COVERS_URL").unwrap_or(defaults.covers_url),
            // An explicitly empty query is allowed: start on an empty search.
            initial_query: lookup("DASHBOARD_QUERY").unwrap_or(defaults.initial_query),
            log_dir: non_empty("DASHBOARD_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Directory that receives `dashboard.log`.
    pub fn resolve_log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_the_public_catalog() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.api_url, "https://openlibrary.org");
        assert_eq!(config.covers_url, "https://covers.openlibrary.org");
        assert_eq!(config.initial_query, "fantasy");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENLIBRARY_API_URL", "http://localhost:8080"),
            ("OPENLIBRARY_COVERS_URL", "  "),
            ("DASHBOARD_QUERY", "space opera"),
            ("DASHBOARD_LOG_DIR", "/tmp/dash"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.covers_url, "https://covers.openlibrary.org");
        assert_eq!(config.initial_query, "space opera");
        assert_eq!(config.resolve_log_dir().unwrap(), PathBuf::from("/tmp/dash"));
    }
}
