use thiserror::Error;

/// Errors raised at the crate's fallible boundaries.
///
/// The controller never surfaces these to the page; they show up when loading
/// bundles, fixtures and preference files.
#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    #[error("preference storage unavailable: {0}")]
    Storage(String),
}

pub type Result<T, E = LocalizationError> = std::result::Result<T, E>;
