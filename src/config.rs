use crate::i18n::{Language, TranslationBundle, PAGE_TITLE_KEY};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names the controller relies on in the page markup and in storage.
///
/// `Default` matches the site's markup: `data-translate` keys,
/// `data-lang` pickers marked `active`, and a `data-cv-link` download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerSettings {
    /// Attribute carrying an element's translation key
    pub translate_attribute: String,

    /// Attribute holding an element's original content while translated
    pub backup_attribute: String,

    /// Attribute marking a language picker entry, valued with its code
    pub option_attribute: String,

    /// Class set on the picker entry for the active language
    pub active_class: String,

    /// Attribute marking the download link
    pub download_link_attribute: String,

    /// Attribute holding the download link's original href while translated
    pub href_backup_attribute: String,

    /// Tag of the page title element
    pub title_tag: String,

    /// Bundle key holding the translated page title
    pub page_title_key: String,

    /// Storage key of the persisted preference
    pub storage_key: String,

    /// Language whose text is embedded in the markup. Must be the embedded
    /// language; a bundle for it would leave no way back to the markup.
    pub default_language: String,
}

impl ControllerSettings {
    /// Reject a default language other than the one embedded in the markup.
    pub fn check(&self) -> Result<()> {
        let language = Language::from_code(&self.default_language)
            .with_context(|| format!("Invalid defaultLanguage '{}'", self.default_language))?;
        if !language.is_embedded() {
            bail!(
                "defaultLanguage '{}' is served from a bundle, expected '{}'",
                language,
                Language::embedded()
            );
        }
        Ok(())
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            translate_attribute: "data-translate".to_string(),
            backup_attribute: "data-original-text".to_string(),
            option_attribute: "data-lang".to_string(),
            active_class: "active".to_string(),
            download_link_attribute: "data-cv-link".to_string(),
            href_backup_attribute: "data-original-href".to_string(),
            title_tag: "title".to_string(),
            page_title_key: PAGE_TITLE_KEY.to_string(),
            storage_key: "language".to_string(),
            default_language: Language::embedded().code().to_string(),
        }
    }
}

/// Configuration for the command-line tools.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON document fixture to localize
    pub document_path: PathBuf,

    /// JSON file holding persisted preferences
    pub store_path: PathBuf,

    /// Translation bundle; the embedded Spanish bundle when unset
    pub bundle_path: Option<PathBuf>,

    pub settings: ControllerSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let settings: ControllerSettings = match std::env::var("LOCALIZER_SETTINGS") {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read settings file {}", path))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse settings file {}", path))?
            }
            Err(_) => ControllerSettings::default(),
        };

        settings.check()?;

        Ok(Self {
            document_path: std::env::var("LOCALIZER_DOCUMENT")
                .map(PathBuf::from)
                .context("LOCALIZER_DOCUMENT not set")?,
            store_path: std::env::var("LOCALIZER_STORE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".localizer/preferences.json")),
            bundle_path: std::env::var("LOCALIZER_BUNDLE").ok().map(PathBuf::from),
            settings,
        })
    }

    /// Load the configured bundle, or the embedded Spanish one.
    pub fn load_bundle(&self) -> Result<TranslationBundle> {
        match &self.bundle_path {
            Some(path) => TranslationBundle::from_path(path)
                .with_context(|| format!("Failed to load bundle {}", path.display())),
            None => TranslationBundle::embedded_spanish().context("Embedded bundle is invalid"),
        }
    }
}
