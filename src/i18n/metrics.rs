//! Counters for translation passes and language selections.
//!
//! Each controller owns its own set; nothing here is global.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMetrics {
    /// Elements whose content was replaced by a bundle entry
    translated: usize,

    /// Elements skipped because their key had no entry
    missing_keys: usize,

    /// Elements restored from their backup
    restored: usize,

    /// Selections that changed the active language
    selections_applied: usize,

    /// Selections of the already-active language
    selections_ignored: usize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_translated(&mut self) {
        self.translated += 1;
    }

    pub fn record_missing_key(&mut self) {
        self.missing_keys += 1;
    }

    pub fn record_restored(&mut self) {
        self.restored += 1;
    }

    pub fn record_selection_applied(&mut self) {
        self.selections_applied += 1;
    }

    pub fn record_selection_ignored(&mut self) {
        self.selections_ignored += 1;
    }

    pub fn report(&self) -> MetricsReport {
        let lookups = self.translated + self.missing_keys;
        let coverage_rate = if lookups > 0 {
            (self.translated as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            translated: self.translated,
            missing_keys: self.missing_keys,
            coverage_rate,
            restored: self.restored,
            selections_applied: self.selections_applied,
            selections_ignored: self.selections_ignored,
        }
    }
}

/// Snapshot of a controller's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub translated: usize,

    pub missing_keys: usize,

    /// Share of key lookups that found an entry, as a percentage (0-100)
    pub coverage_rate: f64,

    pub restored: usize,

    pub selections_applied: usize,

    pub selections_ignored: usize,
}
