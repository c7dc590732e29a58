//! Languages and translation data.
//!
//! - `language`: the markup language and the bundled one
//! - `bundle`: the alternate language's strings, with per-key rich-text flags
//! - `validator`: checks a bundle against the page it will be applied to
//! - `metrics`: per-controller pass and selection counters
//!
//! # Example
//!
//! ```rust,ignore
//! use page_localizer::i18n::{Language, TranslationBundle};
//!
//! let spanish = Language::from_code("es")?;
//! let bundle = TranslationBundle::embedded_spanish()?;
//! assert_eq!(bundle.language(), spanish.code());
//! ```

mod bundle;
mod language;
mod metrics;
mod validator;

pub use bundle::{TranslationBundle, TranslationEntry, PAGE_TITLE_KEY};
pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use validator::{TranslationValidator, ValidationReport};
