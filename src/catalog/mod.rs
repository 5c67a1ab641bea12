//! Catalog access split across logical submodules: the HTTP client, its wire
//! types and errors, URL helpers, and the background dispatcher the TUI uses.

mod client;
mod covers;
mod dispatch;
mod error;
pub mod raw;

pub use client::{CatalogClient, SEARCH_LIMIT};
pub use covers::{cover_url, work_id_from_key, work_page_url, CoverSize};
pub use dispatch::{Dispatcher, FetchOutcome};
pub use error::CatalogError;
