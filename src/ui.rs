//! Ratatui front-end: a dashboard route with search, author filter, stat
//! cards, charts and a results table, and a detail route for a single work.

mod app;
mod charts;
mod controls;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
