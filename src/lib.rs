//! Core library surface for the OpenLibrary books dashboard.
//!
//! The data pipeline (fetch, normalize, filter, aggregate) lives in plain
//! modules so it can be exercised without a terminal; `ui` renders it.
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod router;
pub mod stats;
pub mod ui;

pub use catalog::{CatalogClient, CatalogError, Dispatcher};
pub use config::Config;
pub use logging::init_logging;
pub use models::{AuthorFilter, AuthorFrequency, BookSummary, DecadeBucket, Stats, WorkDetail};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
