//! Bundle validation against a page.
//!
//! Nothing found here stops the controller: missing keys are skipped at
//! runtime and markup in plain entries renders literally. The report exists
//! so those cases are noticed before a page ships.

use crate::config::ControllerSettings;
use crate::dom::DocumentTree;
use crate::i18n::{Language, TranslationBundle};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that make the bundle unusable
    pub errors: Vec<String>,

    /// Problems that degrade the translated page
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TranslationValidator;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Check `bundle` against the keys, title and download link of `document`.
    pub fn validate<D: DocumentTree>(
        document: &D,
        bundle: &TranslationBundle,
        settings: &ControllerSettings,
    ) -> ValidationReport {
        let mut report = Self::validate_bundle(bundle);

        let page_keys: BTreeSet<String> = document
            .elements_with_attribute(&settings.translate_attribute)
            .iter()
            .filter_map(|el| document.attribute(el, &settings.translate_attribute))
            .collect();

        let missing: Vec<&str> = page_keys
            .iter()
            .map(String::as_str)
            .filter(|key| bundle.get(key).is_none())
            .collect();
        if !missing.is_empty() {
            report.warnings.push(format!(
                "Missing translations for {} keys: {:?}",
                missing.len(),
                missing
            ));
        }

        let unused: Vec<&str> = bundle
            .keys()
            .filter(|key| *key != settings.page_title_key && !page_keys.contains(*key))
            .collect();
        if !unused.is_empty() {
            report.warnings.push(format!(
                "Unused entries: {} keys not found in the page: {:?}",
                unused.len(),
                unused
            ));
        }

        if document.first_by_tag(&settings.title_tag).is_some()
            && bundle.get(&settings.page_title_key).is_none()
        {
            report.warnings.push(format!(
                "Page has a <{}> but the bundle has no '{}' entry",
                settings.title_tag, settings.page_title_key
            ));
        }

        if document
            .first_with_attribute(&settings.download_link_attribute)
            .is_some()
            && bundle.download_href().is_none()
        {
            report.warnings.push(format!(
                "Page has a [{}] link but the bundle has no downloadHref",
                settings.download_link_attribute
            ));
        }

        report
    }

    /// Checks that need only the bundle.
    pub fn validate_bundle(bundle: &TranslationBundle) -> ValidationReport {
        let mut report = ValidationReport::new();

        match Language::from_code(bundle.language()) {
            Err(e) => report.errors.push(format!("Bundle language: {}", e)),
            Ok(language) if language.is_embedded() => report.errors.push(format!(
                "Bundle language '{}' ({}) is the default language embedded in the page",
                language,
                language.name()
            )),
            Ok(_) => {}
        }

        for (key, entry) in bundle.iter() {
            if entry.text().is_empty() {
                report
                    .warnings
                    .push(format!("Entry '{}' is empty and will be skipped", key));
                continue;
            }
            if !entry.is_rich_text() {
                let tags = Self::extract_tags(entry.text());
                if !tags.is_empty() {
                    report.warnings.push(format!(
                        "Entry '{}' has markup {:?} without richText and will render literally",
                        key, tags
                    ));
                }
            }
        }

        report
    }

    /// Extract markup tags from text
    fn extract_tags(text: &str) -> Vec<String> {
        let regex = TAG_REGEX.get_or_init(|| Regex::new(r"</?[a-zA-Z][^<>]*>").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
