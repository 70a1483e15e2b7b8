//! Integration tests for the UI localization library
//!
//! These tests drive the registry, elements and sources together through the
//! public API, the way a game client would.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

use ui_localization::element::{
    ElementHandle, ElementKind, ElementState, Label, Localizable, MeshTextElement, SharedElement,
    TextElement, TextMesh, TextStyle,
};
use ui_localization::error::{LocalizationError, Result};
use ui_localization::i18n::{
    JsonFileSource, Language, LocalizationRegistry, MemorySource, OverrideRegistry,
    RegistrySettings, TextResolver, TranslationEntry, TranslationSource,
};

// ==================== Test Helpers ====================

fn greeting_source() -> MemorySource {
    MemorySource::new(
        "ui_tran",
        vec![TranslationEntry::new("你好")
            .unwrap()
            .with(Language::En, "Hello")
            .with(Language::Ja, "こんにちは")],
    )
}

fn initialized_registry() -> LocalizationRegistry {
    let mut registry = LocalizationRegistry::new(RegistrySettings::default());
    registry.initialize([greeting_source()]);
    registry
}

/// Records the language of every notification into a shared log.
struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<(&'static str, Language)>>>,
}

impl Localizable for Recorder {
    fn kind(&self) -> ElementKind {
        ElementKind::Text
    }

    fn on_language_change(&mut self, resolver: &TextResolver<'_>) -> Result<()> {
        self.log.borrow_mut().push((self.name, resolver.language()));
        Ok(())
    }
}

fn recorder(
    name: &'static str,
    log: &Rc<RefCell<Vec<(&'static str, Language)>>>,
) -> SharedElement {
    Rc::new(RefCell::new(Recorder {
        name,
        log: log.clone(),
    }))
}

fn attach_label(
    key: &str,
    registry: &mut LocalizationRegistry,
) -> ElementHandle<TextElement<Label>> {
    TextElement::attach(
        Label::new(key, TextStyle::default()),
        OverrideRegistry::new(),
        registry,
    )
}

fn write_source(dir: &TempDir, name: &str, json: &str) {
    std::fs::write(dir.path().join(format!("{}.json", name)), json)
        .expect("Failed to write translation source");
}

// ==================== Text Resolution Tests ====================

#[test]
fn test_greeting_in_every_language() {
    let mut registry = initialized_registry();
    let handle = attach_label("你好", &mut registry);

    assert_eq!(handle.borrow().displayed_text(), "你好");

    registry.set_language(Language::En);
    assert_eq!(handle.borrow().displayed_text(), "Hello");

    registry.set_language(Language::Ja);
    assert_eq!(handle.borrow().displayed_text(), "こんにちは");

    // No French translation: the key is shown
    registry.set_language(Language::Fr);
    assert_eq!(handle.borrow().displayed_text(), "你好");
    assert_eq!(handle.borrow().key(), "你好");
}

#[test]
fn test_round_trip_restores_source_text() {
    let mut registry = initialized_registry();
    let handle = attach_label("你好", &mut registry);

    registry.set_language(Language::En);
    registry.set_language(Language::Zh);

    assert_eq!(handle.borrow().displayed_text(), "你好");
}

#[test]
fn test_set_key_while_attached() {
    let mut registry = initialized_registry();
    registry.set_language(Language::En);
    let handle = attach_label("未知", &mut registry);
    assert_eq!(handle.borrow().displayed_text(), "未知");

    let changed = handle.borrow_mut().set_key("你好", &registry.resolver());
    assert!(changed);
    assert_eq!(handle.borrow().displayed_text(), "Hello");

    registry.set_language(Language::Ja);
    assert_eq!(handle.borrow().displayed_text(), "こんにちは");
}

// ==================== Style Override Tests ====================

#[test]
fn test_font_size_override_reverts_to_default() {
    let mut registry = initialized_registry();
    let overrides = OverrideRegistry::from_pairs(vec![(Language::En, TextStyle::sized(20))]);
    let handle = TextElement::attach(
        Label::new("你好", TextStyle::default()),
        overrides,
        &mut registry,
    );

    assert_eq!(handle.borrow().surface().style.font_size, 14);

    registry.set_language(Language::En);
    assert_eq!(handle.borrow().surface().style.font_size, 20);

    registry.set_language(Language::Fr);
    assert_eq!(handle.borrow().surface().style.font_size, 14);
}

#[test]
fn test_mesh_text_requires_mesh() {
    let mut registry = initialized_registry();
    let result =
        MeshTextElement::<TextMesh>::attach(None, OverrideRegistry::new(), &mut registry);

    assert!(matches!(
        result,
        Err(LocalizationError::MissingSurface {
            kind: ElementKind::MeshText,
            ..
        })
    ));
    assert_eq!(registry.subscriber_count(), 0);
}

// ==================== Notification Tests ====================

#[test]
fn test_subscribers_notified_in_registration_order() {
    let mut registry = initialized_registry();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = recorder("A", &log);
    let b = recorder("B", &log);
    let c = recorder("C", &log);
    for element in [&a, &b, &c] {
        registry.register(element);
    }

    let report = registry.set_language(Language::En);

    assert_eq!(report.notified, 3);
    assert_eq!(
        *log.borrow(),
        vec![("A", Language::En), ("B", Language::En), ("C", Language::En)]
    );
}

#[test]
fn test_same_language_switch_is_a_no_op() {
    let mut registry = initialized_registry();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = recorder("A", &log);
    registry.register(&a);

    registry.set_language(Language::En);
    let report = registry.set_language(Language::En);

    assert!(report.skipped);
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(registry.metrics().skipped_switches(), 1);
}

#[test]
fn test_unregistered_element_is_not_notified() {
    let mut registry = initialized_registry();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = recorder("A", &log);
    let b = recorder("B", &log);
    registry.register(&a);
    registry.register(&b);

    assert!(registry.unregister(&a));
    assert!(!registry.unregister(&a));
    registry.set_language(Language::Ja);

    assert_eq!(*log.borrow(), vec![("B", Language::Ja)]);
}

#[test]
fn test_detached_and_dropped_handles_stop_receiving() {
    let mut registry = initialized_registry();
    let mut detached = attach_label("你好", &mut registry);
    let dropped = attach_label("你好", &mut registry);
    assert_eq!(registry.subscriber_count(), 2);

    assert!(detached.detach(&mut registry));
    assert_eq!(detached.state(), ElementState::Detached);
    assert!(!detached.attach(&mut registry));
    drop(dropped);

    let report = registry.set_language(Language::En);
    assert_eq!(report.notified, 0);
    assert_eq!(registry.subscriber_count(), 0);
    assert_eq!(detached.borrow().displayed_text(), "你好");
}

#[test]
fn test_element_attached_before_initialize_is_refreshed() {
    let mut registry = LocalizationRegistry::new(RegistrySettings {
        source_language: Language::Zh,
        default_language: Language::En,
    });
    let handle = ElementHandle::attached(
        TextElement::new(Label::new("你好", TextStyle::default())),
        &mut registry,
    );
    assert_eq!(handle.borrow().displayed_text(), "你好");

    registry.initialize([greeting_source()]);

    assert_eq!(registry.current_language(), Language::En);
    assert_eq!(handle.borrow().displayed_text(), "Hello");
}

// ==================== Source Loading Tests ====================

#[test]
fn test_json_sources_merge_last_wins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_source(
        &dir,
        "ui_tran",
        r#"{ "1": { "key": "你好", "en": "Hello", "ja": "こんにちは" } }"#,
    );
    write_source(&dir, "patch_tran", r#"[ { "key": "你好", "en": "Hi" } ]"#);

    let mut registry = LocalizationRegistry::default();
    let sources =
        JsonFileSource::from_names(dir.path(), ["ui_tran", "missing_tran", "patch_tran"]);
    assert!(registry.initialize(&sources));

    registry.set_language(Language::En);
    assert_eq!(registry.get_text("你好"), "Hi");

    // The later entry replaced the whole row
    registry.set_language(Language::Ja);
    assert_eq!(registry.get_text("你好"), "你好");
}

#[test]
fn test_keyed_json_rows_merge_in_written_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_source(
        &dir,
        "ui_tran",
        r#"{
            "2": { "key": "你好", "en": "older row" },
            "10": { "key": "你好", "en": "newer row" }
        }"#,
    );

    let mut registry = LocalizationRegistry::default();
    registry.initialize([JsonFileSource::new(dir.path(), "ui_tran")]);
    registry.set_language(Language::En);

    assert_eq!(registry.get_text("你好"), "newer row");
}

#[test]
fn test_mixed_source_types() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_source(&dir, "menu_tran", r#"[ { "key": "菜单", "fr": "Menu" } ]"#);

    let sources: Vec<Box<dyn TranslationSource>> = vec![
        Box::new(greeting_source()),
        Box::new(JsonFileSource::new(dir.path(), "menu_tran")),
    ];
    let mut registry = LocalizationRegistry::default();
    registry.initialize(sources);

    registry.set_language(Language::Fr);
    assert_eq!(registry.get_text("菜单"), "Menu");
    assert_eq!(registry.table().len(), 2);
}

#[test]
fn test_teardown_and_reinitialize() {
    let mut registry = initialized_registry();
    let handle = attach_label("你好", &mut registry);
    registry.set_language(Language::En);

    registry.teardown();
    assert!(!registry.is_initialized());
    assert_eq!(registry.subscriber_count(), 0);
    assert_eq!(registry.current_language(), Language::Zh);
    assert!(handle.is_orphaned(&registry));

    assert!(registry.initialize([greeting_source()]));
    registry.set_language(Language::Ja);
    assert_eq!(registry.get_text("你好"), "こんにちは");
    // Torn-down subscribers stay where they were
    assert_eq!(handle.borrow().displayed_text(), "Hello");
}

// ==================== Property Tests ====================

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_absent_key_resolves_to_itself(key in "\\PC{0,24}", lang in language()) {
        prop_assume!(key != "你好");
        let mut registry = initialized_registry();
        registry.set_language(lang);
        prop_assert_eq!(registry.get_text(&key), key);
    }

    #[test]
    fn prop_source_language_returns_key(lang in language()) {
        let mut registry = LocalizationRegistry::new(RegistrySettings::with_source(lang));
        registry.initialize([MemorySource::new(
            "all",
            vec![TranslationEntry::new("k")
                .unwrap()
                .with(Language::Zh, "zh")
                .with(Language::En, "en")
                .with(Language::Ja, "ja")
                .with(Language::Fr, "fr")],
        )]);
        prop_assert_eq!(registry.get_text("k"), "k");
    }
}
