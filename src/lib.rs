//! Client-side language toggle for a static site.
//!
//! A [`LocalizationController`] switches a page between the language written
//! in its markup and a single translated language, remembers the choice in a
//! [`PreferenceStore`], and restores the original content on the way back.
//! The page is reached through the [`dom::DocumentTree`] trait, so the same
//! controller runs against the browser DOM (feature `web`) or an in-memory
//! [`dom::MemoryDocument`].

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod storage;

pub use config::{Config, ControllerSettings};
pub use controller::{LocalizationController, TranslationPass};
pub use error::LocalizationError;
pub use storage::{FileStore, MemoryStore, PreferenceStore};
