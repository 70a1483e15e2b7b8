//! Localization core: languages, translation tables and the registry that
//! keeps UI elements in the active language.
//!
//! # Architecture
//!
//! - `language`: the closed set of display languages
//! - `table`: key → per-language strings
//! - `source`: where tables are loaded from (JSON files, memory)
//! - `overrides`: per-element, per-language visual overrides
//! - `registry`: current language, subscribers and change notification
//! - `validator`: authoring checks for tables and override lists
//! - `metrics`: lookup and notification counters
//!
//! # Example
//!
//! ```rust
//! use ui_localization::i18n::{Language, LocalizationRegistry, MemorySource, TranslationEntry};
//!
//! let mut registry = LocalizationRegistry::default();
//! let entry = TranslationEntry::new("开始").unwrap().with(Language::En, "Start");
//! registry.initialize([MemorySource::new("ui", vec![entry])]);
//!
//! assert_eq!(registry.get_text("开始"), "开始");
//! registry.set_language(Language::En);
//! assert_eq!(registry.get_text("开始"), "Start");
//! ```

mod language;
mod metrics;
mod overrides;
mod registry;
mod source;
mod table;
mod validator;

pub use language::{Language, LanguageInfo};
pub use metrics::{LocalizationMetrics, MetricsReport};
pub use overrides::{OverrideLists, OverrideRegistry};
pub use registry::{
    LocalizationRegistry, NotificationFailure, NotificationReport, RegistrySettings, TextResolver,
};
pub use source::{parse_entries, JsonFileSource, MemorySource, TranslationSource};
pub use table::{TranslationEntry, TranslationTable};
pub use validator::{TranslationValidator, ValidationReport};
