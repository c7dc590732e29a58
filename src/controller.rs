//! The localization controller.
//!
//! Swaps a page between the language embedded in its markup and the language
//! of a translation bundle. Original content is kept in a backup attribute on
//! each translated element, so switching back reproduces the markup exactly.
//!
//! Lifecycle: construct with a document, a preference store and an optional
//! bundle, call [`LocalizationController::initialize`] once, then forward
//! picker activations to [`LocalizationController::on_option_activated`] or
//! call [`LocalizationController::select_language`] directly.

use crate::config::ControllerSettings;
use crate::dom::{Content, DocumentTree};
use crate::i18n::{MetricsReport, TranslationBundle, TranslationMetrics};
use crate::storage::PreferenceStore;
use tracing::{debug, trace, warn};

/// What a translate-or-restore pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationPass {
    /// Bundle entries were written into the page.
    Applied { translated: usize, missing: usize },
    /// Backed-up content was written back.
    Restored { restored: usize },
    /// Active language is neither the default nor the bundle's language,
    /// or no bundle is loaded. The page is left as is.
    Unchanged,
}

pub struct LocalizationController<D: DocumentTree, S: PreferenceStore> {
    document: D,
    store: S,
    bundle: Option<TranslationBundle>,
    settings: ControllerSettings,
    active: String,
    options: Vec<D::Element>,
    metrics: TranslationMetrics,
}

impl<D: DocumentTree, S: PreferenceStore> LocalizationController<D, S> {
    pub fn new(document: D, store: S, bundle: Option<TranslationBundle>) -> Self {
        Self::with_settings(document, store, bundle, ControllerSettings::default())
    }

    pub fn with_settings(
        document: D,
        store: S,
        bundle: Option<TranslationBundle>,
        settings: ControllerSettings,
    ) -> Self {
        let active = settings.default_language.clone();
        Self {
            document,
            store,
            bundle,
            settings,
            active,
            options: Vec::new(),
            metrics: TranslationMetrics::new(),
        }
    }

    /// Restore the persisted choice and bring the page in line with it.
    ///
    /// Order matters: picker state and the document language are synced
    /// before the picker options are collected, and both before the first
    /// pass, so the first paint never shows a picker that disagrees with the
    /// content. Callers attach their activation listeners to [`Self::options`]
    /// once this returns.
    pub fn initialize(&mut self) -> TranslationPass {
        self.active = self
            .store
            .load(&self.settings.storage_key)
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| self.settings.default_language.clone());
        debug!("Initializing localization with language '{}'", self.active);

        self.sync_ui();
        self.collect_options();
        self.translate_or_restore()
    }

    /// Switch to `code`. Returns `false`, touching nothing, when `code` is
    /// already active.
    pub fn select_language(&mut self, code: &str) -> bool {
        if code == self.active {
            self.metrics.record_selection_ignored();
            trace!("Language '{}' already active, ignoring selection", code);
            return false;
        }

        debug!("Switching language from '{}' to '{}'", self.active, code);
        self.active = code.to_string();
        if let Err(e) = self.store.store(&self.settings.storage_key, code) {
            warn!("Failed to persist language preference '{}': {}", code, e);
        }
        self.metrics.record_selection_applied();

        self.sync_ui();
        self.translate_or_restore();
        true
    }

    /// Handle activation of a language picker entry.
    ///
    /// Entries without a code are ignored.
    pub fn on_option_activated(&mut self, option: &D::Element) -> bool {
        match self.document.attribute(option, &self.settings.option_attribute) {
            Some(code) if !code.is_empty() => self.select_language(&code),
            _ => false,
        }
    }

    /// Mark exactly the picker entries for the active language and set the
    /// document language.
    pub fn sync_ui(&mut self) {
        let attribute = &self.settings.option_attribute;
        for option in self.document.elements_with_attribute(attribute) {
            let is_active = self.document.attribute(&option, attribute).as_deref()
                == Some(self.active.as_str());
            self.document
                .set_class(&option, &self.settings.active_class, is_active);
        }
        self.document.set_language(&self.active);
    }

    /// Apply the bundle, restore the original content, or do nothing,
    /// depending on the active language.
    ///
    /// The default language always restores, even if a bundle claims it.
    pub fn translate_or_restore(&mut self) -> TranslationPass {
        let is_bundle_language =
            self.bundle.as_ref().map(TranslationBundle::language) == Some(self.active.as_str());

        if self.active == self.settings.default_language {
            self.restore_original()
        } else if is_bundle_language {
            self.apply_translations()
        } else {
            debug!(
                "No translation source for language '{}', leaving content unchanged",
                self.active
            );
            TranslationPass::Unchanged
        }
    }

    /// Write bundle entries into every element whose key has one.
    ///
    /// Content is backed up only when no backup exists yet, so repeated
    /// passes never lose the original.
    pub fn apply_translations(&mut self) -> TranslationPass {
        let Some(bundle) = self.bundle.as_ref() else {
            return TranslationPass::Unchanged;
        };
        let settings = &self.settings;
        let document = &mut self.document;

        let mut translated = 0;
        let mut missing = 0;
        for element in document.elements_with_attribute(&settings.translate_attribute) {
            let Some(key) = document.attribute(&element, &settings.translate_attribute) else {
                continue;
            };
            let Some(entry) = bundle.get(&key) else {
                trace!("No translation for key '{}'", key);
                self.metrics.record_missing_key();
                missing += 1;
                continue;
            };

            if !document.has_attribute(&element, &settings.backup_attribute) {
                let original = document.read(&element, entry.is_rich_text()).into_string();
                document.set_attribute(&element, &settings.backup_attribute, &original);
            }
            document.write(&element, &entry.render());
            self.metrics.record_translated();
            translated += 1;
        }

        if let (Some(title), Some(text)) = (
            document.first_by_tag(&settings.title_tag),
            bundle.get(&settings.page_title_key),
        ) {
            if !document.has_attribute(&title, &settings.backup_attribute) {
                let original = document.text(&title);
                document.set_attribute(&title, &settings.backup_attribute, &original);
            }
            document.set_text(&title, text.text());
        }

        if let (Some(link), Some(href)) = (
            document.first_with_attribute(&settings.download_link_attribute),
            bundle.download_href(),
        ) {
            if !document.has_attribute(&link, &settings.href_backup_attribute) {
                let original = document.attribute(&link, "href").unwrap_or_default();
                document.set_attribute(&link, &settings.href_backup_attribute, &original);
            }
            document.set_attribute(&link, "href", href);
        }

        debug!(
            "Applied '{}' translations: {} translated, {} missing",
            bundle.language(),
            translated,
            missing
        );
        TranslationPass::Applied {
            translated,
            missing,
        }
    }

    /// Write every backup back into its element and drop the backups.
    ///
    /// Elements that were never translated carry no backup and are skipped.
    pub fn restore_original(&mut self) -> TranslationPass {
        let settings = &self.settings;
        let document = &mut self.document;
        let bundle = self.bundle.as_ref();

        let mut restored = 0;
        for element in document.elements_with_attribute(&settings.backup_attribute) {
            let Some(key) = document.attribute(&element, &settings.translate_attribute) else {
                continue;
            };
            let Some(original) = document.attribute(&element, &settings.backup_attribute) else {
                continue;
            };

            let rich = bundle.map(|b| b.is_rich_text(&key)).unwrap_or(false);
            let content = if rich {
                Content::Markup(original)
            } else {
                Content::Text(original)
            };
            document.write(&element, &content);
            document.remove_attribute(&element, &settings.backup_attribute);
            self.metrics.record_restored();
            restored += 1;
        }

        if let Some(title) = document.first_by_tag(&settings.title_tag) {
            if let Some(original) = document.attribute(&title, &settings.backup_attribute) {
                document.set_text(&title, &original);
                document.remove_attribute(&title, &settings.backup_attribute);
            }
        }

        if let Some(link) = document.first_with_attribute(&settings.download_link_attribute) {
            if let Some(original) = document.attribute(&link, &settings.href_backup_attribute) {
                if original.is_empty() {
                    document.remove_attribute(&link, "href");
                } else {
                    document.set_attribute(&link, "href", &original);
                }
                document.remove_attribute(&link, &settings.href_backup_attribute);
            }
        }

        debug!("Restored {} elements to default language", restored);
        TranslationPass::Restored { restored }
    }

    fn collect_options(&mut self) {
        self.options = self
            .document
            .elements_with_attribute(&self.settings.option_attribute);
        debug!("Collected {} language options", self.options.len());
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Picker entries collected by `initialize`.
    pub fn options(&self) -> &[D::Element] {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bundle(&self) -> Option<&TranslationBundle> {
        self.bundle.as_ref()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    pub fn into_parts(self) -> (D, S) {
        (self.document, self.store)
    }
}
