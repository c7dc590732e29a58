//! Localize a page fixture the way the browser would.
//!
//! Usage:
//!   cargo run -- [code]     # initialize, optionally select `code`, print the page
//!
//! Required environment variables:
//! - LOCALIZER_DOCUMENT
//!
//! Optional:
//! - LOCALIZER_STORE (defaults to .localizer/preferences.json)
//! - LOCALIZER_BUNDLE (defaults to the embedded Spanish bundle)
//! - LOCALIZER_SETTINGS (JSON overrides for attribute names and storage key)

use anyhow::{Context, Result};
use page_localizer::{config::Config, dom::MemoryDocument, FileStore, LocalizationController};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the page JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("page_localizer=info".parse()?),
        )
        .init();

    let selection = std::env::args().nth(1);
    let config = Config::from_env()?;

    let document = MemoryDocument::from_path(&config.document_path).with_context(|| {
        format!("Failed to load document {}", config.document_path.display())
    })?;
    let bundle = config.load_bundle()?;
    info!(
        "Loaded {} elements and {} '{}' entries",
        document.len(),
        bundle.len(),
        bundle.language()
    );

    let store = FileStore::new(&config.store_path);
    let mut controller =
        LocalizationController::with_settings(document, store, Some(bundle), config.settings);

    let pass = controller.initialize();
    info!("Initialized in '{}': {:?}", controller.active_language(), pass);

    if let Some(code) = selection {
        if controller.select_language(&code) {
            info!("Switched to '{}'", code);
        } else {
            info!("'{}' is already active", code);
        }
    }

    println!("{}", controller.document().to_json_pretty()?);
    info!("Metrics: {}", serde_json::to_string(&controller.metrics())?);
    Ok(())
}
