//! Check a translation bundle against a page fixture.
//!
//! Usage:
//!   cargo run --bin validate-bundle
//!
//! Reads the same environment as the main binary. Prints the report as JSON
//! and exits non-zero when it contains errors.

use anyhow::{Context, Result};
use page_localizer::{config::Config, dom::MemoryDocument, i18n::TranslationValidator};
use tracing::{info, warn};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("validate_bundle=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let document = MemoryDocument::from_path(&config.document_path).with_context(|| {
        format!("Failed to load document {}", config.document_path.display())
    })?;
    let bundle = config.load_bundle()?;

    let report = TranslationValidator::validate(&document, &bundle, &config.settings);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.has_errors() {
        anyhow::bail!("Bundle '{}' has {} errors", bundle.language(), report.errors.len());
    }

    info!(
        "Bundle '{}' is usable ({} warnings)",
        bundle.language(),
        report.warnings.len()
    );
    Ok(())
}
