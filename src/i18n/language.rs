//! The languages a page can be shown in.
//!
//! One language is written directly into the markup; the other arrives as a
//! translation bundle and is swapped in over it.

use crate::error::{LocalizationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code, as used in `data-lang` and the document `lang`
    code: &'static str,

    /// Name in the language itself
    name: &'static str,

    /// Whether this language's text lives in the page markup
    embedded: bool,
}

const LANGUAGES: [Language; 2] = [
    Language {
        code: "en",
        name: "English",
        embedded: true,
    },
    Language {
        code: "es",
        name: "Español",
        embedded: false,
    },
];

impl Language {
    /// Look up a language by code. Codes are case sensitive.
    pub fn from_code(code: &str) -> Result<Language> {
        LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.code == code)
            .ok_or_else(|| LocalizationError::UnknownLanguage(code.to_string()))
    }

    /// The language written in the page markup.
    pub fn embedded() -> Language {
        LANGUAGES[0]
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}
