//! Binary entry point: read configuration, start logging, build the catalog
//! client and its dispatcher, then drive the Ratatui event loop until exit.
use anyhow::Context;
use openlibrary_dashboard::{init_logging, run_app, App, CatalogClient, Config, Dispatcher};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let log_path = init_logging(&config)?;
    info!(log = %log_path.display(), api = %config.api_url, "starting dashboard");

    let client = CatalogClient::new(config.api_url.clone())
        .context("failed to build the catalog HTTP client")?;
    let dispatcher = Dispatcher::new(client)?;

    let mut app = App::new(config, dispatcher);
    run_app(&mut app)
}
