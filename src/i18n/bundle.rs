//! Translation bundles: the alternate language's strings, keyed by the
//! `data-translate` value of the element they replace.
//!
//! A bundle is loaded once and never mutated. Each entry is either a bare
//! string (rendered as plain text) or an object flagged `"richText": true`,
//! whose blank-line paragraph breaks are rendered as `<br><br>` markup.
//!
//! ```json
//! {
//!   "language": "es",
//!   "downloadHref": "files/CV_ES.pdf",
//!   "entries": {
//!     "navHome": "Inicio",
//!     "aboutText": { "text": "Uno.\n\nDos.", "richText": true }
//!   }
//! }
//! ```

use crate::dom::Content;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Reserved key holding the text for the page `<title>`.
pub const PAGE_TITLE_KEY: &str = "pageTitle";

/// Markup inserted for each blank-line paragraph break in rich-text entries.
const PARAGRAPH_BREAK: &str = "<br><br>";

/// The Spanish bundle the site ships with.
const EMBEDDED_SPANISH: &str = include_str!("../../data/translations/es.json");

/// A single translated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct TranslationEntry {
    text: String,
    rich_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Plain(String),
    Detailed {
        text: String,
        #[serde(default, rename = "richText")]
        rich_text: bool,
    },
}

impl From<RawEntry> for TranslationEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Plain(text) => Self {
                text,
                rich_text: false,
            },
            RawEntry::Detailed { text, rich_text } => Self { text, rich_text },
        }
    }
}

impl From<TranslationEntry> for RawEntry {
    fn from(entry: TranslationEntry) -> Self {
        if entry.rich_text {
            RawEntry::Detailed {
                text: entry.text,
                rich_text: true,
            }
        } else {
            RawEntry::Plain(entry.text)
        }
    }
}

impl TranslationEntry {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rich_text: false,
        }
    }

    pub fn rich(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rich_text: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_rich_text(&self) -> bool {
        self.rich_text
    }

    /// Content to write into the element.
    pub fn render(&self) -> Content {
        if self.rich_text {
            Content::Markup(self.text.replace("\n\n", PARAGRAPH_BREAK))
        } else {
            Content::Text(self.text.clone())
        }
    }
}

/// Read-only key → value mapping for one alternate language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBundle {
    language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_href: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, TranslationEntry>,
}

impl TranslationBundle {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            download_href: None,
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style setter for the alternate download resource.
    pub fn with_download_href(mut self, href: impl Into<String>) -> Self {
        self.download_href = Some(href.into());
        self
    }

    /// Builder-style insert, used when assembling bundles in code.
    pub fn with_entry(mut self, key: impl Into<String>, entry: TranslationEntry) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The Spanish bundle compiled into the crate.
    pub fn embedded_spanish() -> Result<Self> {
        Self::from_json(EMBEDDED_SPANISH)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn download_href(&self) -> Option<&str> {
        self.download_href.as_deref()
    }

    /// Look up a key. Empty values count as missing.
    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key).filter(|entry| !entry.text.is_empty())
    }

    pub fn page_title(&self) -> Option<&str> {
        self.get(PAGE_TITLE_KEY).map(TranslationEntry::text)
    }

    /// Whether the key is flagged rich-text. Unknown keys are plain.
    pub fn is_rich_text(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(TranslationEntry::is_rich_text)
            .unwrap_or(false)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
