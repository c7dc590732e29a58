//! Integration tests for the page localizer
//!
//! These tests drive the controller end to end against the sample page in
//! `data/pages/index.json` and the embedded Spanish bundle, and check the
//! toggle's invariants over generated pages.

use page_localizer::{
    dom::{DocumentTree, ElementId, MemoryDocument, MemoryElement},
    i18n::{TranslationBundle, TranslationEntry, TranslationValidator},
    ControllerSettings, FileStore, LocalizationController, MemoryStore, PreferenceStore,
    TranslationPass,
};
use proptest::prelude::*;
use tempfile::TempDir;

const SAMPLE_PAGE: &str = include_str!("../data/pages/index.json");

// ==================== Test Helpers ====================

fn sample_page() -> MemoryDocument {
    MemoryDocument::from_json(SAMPLE_PAGE).expect("Sample page should parse")
}

fn spanish() -> TranslationBundle {
    TranslationBundle::embedded_spanish().expect("Embedded bundle should parse")
}

fn element(doc: &MemoryDocument, key: &str) -> ElementId {
    doc.find_by_attribute("data-translate", key)
        .expect("Element should exist in sample page")
}

fn active_codes(doc: &MemoryDocument) -> Vec<String> {
    doc.elements_with_attribute("data-lang")
        .into_iter()
        .filter(|option| doc.has_class(option, "active"))
        .filter_map(|option| doc.attribute(&option, "data-lang"))
        .collect()
}

fn title_text(doc: &MemoryDocument) -> String {
    let title = doc.first_by_tag("title").expect("Sample page has a title");
    doc.text(&title)
}

fn cv_href(doc: &MemoryDocument) -> Option<String> {
    let link = doc
        .first_with_attribute("data-cv-link")
        .expect("Sample page has a CV link");
    doc.attribute(&link, "href")
}

// ==================== Scenario Tests ====================

#[test]
fn test_fresh_load_shows_default_language() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    controller.initialize();

    let doc = controller.document();
    assert_eq!(controller.active_language(), "en");
    assert_eq!(title_text(doc), "Home");
    assert_eq!(doc.text(&element(doc, "navAbout")), "About");
    assert_eq!(active_codes(doc), vec!["en".to_string()]);
    assert!(doc.elements_with_attribute("data-original-text").is_empty());
}

#[test]
fn test_select_spanish_translates_page() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    controller.initialize();
    assert!(controller.select_language("es"));

    let doc = controller.document();
    assert_eq!(doc.text(&element(doc, "navHome")), "Inicio");
    assert_eq!(doc.text(&element(doc, "navAbout")), "Sobre Mí");
    assert_eq!(
        doc.text(&element(doc, "heroBadge")),
        "Ciencia de Datos & IA • Ingeniería Informática"
    );
    assert_eq!(doc.text(&element(doc, "btnViewResume")), "Ver Currículum");
    assert_eq!(title_text(doc), "Inicio");
    assert_eq!(cv_href(doc).as_deref(), Some("files/CV_ES_AitorDiez.pdf"));
    assert_eq!(doc.language().as_deref(), Some("es"));
    assert_eq!(active_codes(doc), vec!["es".to_string()]);
    assert_eq!(controller.store().load("language").as_deref(), Some("es"));
}

#[test]
fn test_rich_text_renders_paragraph_breaks() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    controller.initialize();
    controller.select_language("es");

    let doc = controller.document();
    let background = doc.markup(&element(doc, "aboutBackgroundText"));
    assert_eq!(background.matches("<br><br>").count(), 2);
    assert!(!background.contains("\n\n"));

    let experience = doc.markup(&element(doc, "aboutExperienceDescription"));
    assert!(experience.contains(r#"<a href="https://www.robertogaray.com">"#));
}

#[test]
fn test_missing_key_is_left_alone() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    let pass = controller.initialize();
    assert_eq!(pass, TranslationPass::Restored { restored: 0 });

    controller.select_language("es");
    let doc = controller.document();
    let name = element(doc, "heroName");
    assert_eq!(doc.text(&name), "Aitor Díez Mateo");
    assert!(!doc.has_attribute(&name, "data-original-text"));

    let metrics = controller.metrics();
    assert_eq!(metrics.translated, 9);
    assert_eq!(metrics.missing_keys, 1);
    assert_eq!(metrics.coverage_rate, 90.0);
}

#[test]
fn test_toggle_back_restores_exact_page() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    controller.initialize();
    let before = controller.document().clone();

    controller.select_language("es");
    controller.select_language("en");

    let doc = controller.document();
    assert_eq!(doc, &before);
    assert_eq!(cv_href(doc).as_deref(), Some("files/CV_EN_AitorDiez.pdf"));
    assert!(doc.elements_with_attribute("data-original-text").is_empty());
    assert!(doc.elements_with_attribute("data-original-href").is_empty());
    assert_eq!(controller.store().load("language").as_deref(), Some("en"));
}

#[test]
fn test_reload_after_selecting_spanish() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let prefs = temp_dir.path().join("prefs.json");

    let mut first =
        LocalizationController::new(sample_page(), FileStore::new(&prefs), Some(spanish()));
    first.initialize();
    first.select_language("es");
    drop(first);

    // Fresh markup, as after a page reload.
    let mut reloaded =
        LocalizationController::new(sample_page(), FileStore::new(&prefs), Some(spanish()));
    let pass = reloaded.initialize();

    assert_eq!(reloaded.active_language(), "es");
    assert!(matches!(pass, TranslationPass::Applied { translated: 9, missing: 1 }));
    let doc = reloaded.document();
    assert_eq!(title_text(doc), "Inicio");
    assert_eq!(doc.text(&element(doc, "navHome")), "Inicio");
    assert_eq!(active_codes(doc), vec!["es".to_string()]);
}

#[test]
fn test_reload_then_switch_back_restores_markup() {
    let mut controller = LocalizationController::new(
        sample_page(),
        MemoryStore::with_value("language", "es"),
        Some(spanish()),
    );
    controller.initialize();
    controller.select_language("en");

    let mut expected = sample_page();
    let en = expected
        .find_by_attribute("data-lang", "en")
        .expect("en option");
    expected.set_class(&en, "active", true);
    assert_eq!(controller.document(), &expected);
}

#[test]
fn test_option_clicks_drive_selection() {
    let mut controller =
        LocalizationController::new(sample_page(), MemoryStore::new(), Some(spanish()));
    controller.initialize();
    let options = controller.options().to_vec();
    assert_eq!(options.len(), 2);

    assert!(controller.on_option_activated(&options[1]));
    assert_eq!(controller.active_language(), "es");
    assert!(!controller.on_option_activated(&options[1]));
    assert!(controller.on_option_activated(&options[0]));
    assert_eq!(controller.active_language(), "en");
    assert_eq!(controller.store().writes(), 2);
}

#[test]
fn test_sample_page_validates_with_only_missing_key_warning() {
    let report = TranslationValidator::validate(
        &sample_page(),
        &spanish(),
        &ControllerSettings::default(),
    );

    assert!(!report.has_errors());
    assert!(report.warnings.iter().any(|w| w.contains("heroName")));
    assert!(report.warnings.iter().any(|w| w.starts_with("Unused entries")));
}

// ==================== Property Tests ====================

/// (has entry, rich text, plain original markup, rich original markup, translated value)
type ElementSpec = (bool, bool, String, String, String);

const TEXT_TOKENS: [&str; 15] = [
    "a", "Z", "0", " ", ".", "é", "&amp;", "&lt;", "&gt;", "&#233;", "&#xE9;", "&nbsp;",
    "&quot;", "&#39;", "&eacute;",
];

/// Text-only markup, spelled with a mix of literal characters and references.
fn text_markup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TEXT_TOKENS.to_vec()), 0..8)
        .prop_map(|tokens| tokens.concat())
}

fn rich_markup() -> impl Strategy<Value = String> {
    let mut tokens = TEXT_TOKENS.to_vec();
    tokens.extend(["<br>", "<em>x</em>", r#"<a href="/cv">cv</a>"#]);
    prop::collection::vec(prop::sample::select(tokens), 0..8).prop_map(|tokens| tokens.concat())
}

fn element_spec() -> impl Strategy<Value = ElementSpec> {
    (
        any::<bool>(),
        any::<bool>(),
        text_markup(),
        rich_markup(),
        "[a-zA-Z0-9 .\n]{0,16}",
    )
}

fn build(specs: &[ElementSpec]) -> (MemoryDocument, TranslationBundle) {
    let mut doc = MemoryDocument::new();
    doc.push(MemoryElement::new("button").with_attribute("data-lang", "en"));
    doc.push(MemoryElement::new("button").with_attribute("data-lang", "es"));

    let mut bundle = TranslationBundle::new("es");
    for (index, (has_entry, rich, plain_original, rich_original, value)) in
        specs.iter().enumerate()
    {
        let key = format!("key{}", index);
        let original = if *rich { rich_original } else { plain_original };
        doc.push(
            MemoryElement::new("p")
                .with_attribute("data-translate", key.as_str())
                .with_markup(original.as_str()),
        );

        if *has_entry {
            let entry = if *rich {
                TranslationEntry::rich(value.as_str())
            } else {
                TranslationEntry::plain(value.as_str())
            };
            bundle = bundle.with_entry(key, entry);
        }
    }
    (doc, bundle)
}

proptest! {
    #[test]
    fn prop_restore_after_apply_reproduces_original(
        specs in prop::collection::vec(element_spec(), 0..12)
    ) {
        let (doc, bundle) = build(&specs);
        let original = doc.clone();
        let mut controller = LocalizationController::new(doc, MemoryStore::new(), Some(bundle));

        controller.apply_translations();
        controller.restore_original();

        prop_assert_eq!(controller.document(), &original);
    }

    #[test]
    fn prop_apply_is_idempotent(specs in prop::collection::vec(element_spec(), 0..12)) {
        let (doc, bundle) = build(&specs);
        let mut controller = LocalizationController::new(doc, MemoryStore::new(), Some(bundle));

        controller.apply_translations();
        let once = controller.document().clone();
        controller.apply_translations();

        prop_assert_eq!(controller.document(), &once);
    }

    #[test]
    fn prop_missing_keys_are_untouched(specs in prop::collection::vec(element_spec(), 0..12)) {
        let (doc, bundle) = build(&specs);
        let original = doc.clone();
        let mut controller = LocalizationController::new(doc, MemoryStore::new(), Some(bundle));
        controller.apply_translations();

        for (index, (has_entry, _, _, _, value)) in specs.iter().enumerate() {
            if *has_entry && !value.is_empty() {
                continue;
            }
            let key = format!("key{}", index);
            let id = original
                .find_by_attribute("data-translate", &key)
                .expect("generated element");
            prop_assert_eq!(controller.document().element(id), original.element(id));
            prop_assert!(!controller.document().has_attribute(&id, "data-original-text"));
        }
    }

    #[test]
    fn prop_exactly_one_active_option(
        specs in prop::collection::vec(element_spec(), 0..6),
        selections in prop::collection::vec(prop::sample::select(vec!["en", "es"]), 0..10)
    ) {
        let (doc, bundle) = build(&specs);
        let mut controller = LocalizationController::new(doc, MemoryStore::new(), Some(bundle));
        controller.initialize();

        for code in selections {
            controller.select_language(code);
            let doc = controller.document();
            let active: Vec<String> = doc
                .elements_with_attribute("data-lang")
                .into_iter()
                .filter(|option| doc.has_class(option, "active"))
                .filter_map(|option| doc.attribute(&option, "data-lang"))
                .collect();
            prop_assert_eq!(active, vec![code.to_string()]);
            prop_assert_eq!(controller.active_language(), code);
        }
    }

    #[test]
    fn prop_reselecting_active_language_changes_nothing(
        specs in prop::collection::vec(element_spec(), 0..6),
        selections in prop::collection::vec(prop::sample::select(vec!["en", "es"]), 0..6)
    ) {
        let (doc, bundle) = build(&specs);
        let mut controller = LocalizationController::new(doc, MemoryStore::new(), Some(bundle));
        controller.initialize();
        for code in selections {
            controller.select_language(code);
        }

        let before = controller.document().clone();
        let writes = controller.store().writes();
        let active = controller.active_language().to_string();

        prop_assert!(!controller.select_language(&active));
        prop_assert_eq!(controller.document(), &before);
        prop_assert_eq!(controller.store().writes(), writes);
    }
}
