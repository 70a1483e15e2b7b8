//! Localization registry: current language, translation table and the live
//! set of elements that follow it.
//!
//! The registry is a plain value owned by the host and passed by reference to
//! whoever needs it. Its lifecycle is explicit:
//!
//! - `new`: uninitialized; `get_text` is the identity, registration works
//! - `initialize`: loads the translation sources, sets the default language
//! - serving: `register` / `unregister` / `get_text` / `set_language`
//! - `teardown`: drops subscribers and table; may be initialized again
//!
//! Everything runs on the caller's thread. `set_language` notifies every live
//! subscriber, in registration order, before returning.

use crate::element::{Localizable, SharedElement};
use crate::error::Result;
use crate::i18n::{Language, LocalizationMetrics, TranslationSource, TranslationTable};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Library-side configuration of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Language whose text is the key itself; never looked up in the table
    pub source_language: Language,

    /// Language selected before any explicit switch and by `initialize`
    pub default_language: Language,
}

impl RegistrySettings {
    /// Source and default both set to `language`.
    pub fn with_source(language: Language) -> Self {
        Self {
            source_language: language,
            default_language: language,
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::with_source(Language::Zh)
    }
}

/// Read-only view of the registry handed to elements while they resolve.
#[derive(Clone, Copy)]
pub struct TextResolver<'a> {
    language: Language,
    source_language: Language,
    table: &'a TranslationTable,
    metrics: &'a LocalizationMetrics,
}

impl<'a> TextResolver<'a> {
    /// Language being resolved for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Language whose text is the key itself.
    pub fn source_language(&self) -> Language {
        self.source_language
    }

    /// Resolve `key` under the current language.
    ///
    /// Returns the key unchanged when it is empty, when the current language
    /// is the source language, or when the table has no translation for it.
    /// Only the last case counts as a fallback in the metrics.
    pub fn resolve<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        if key.is_empty() || self.language == self.source_language {
            self.metrics.record_lookup(false);
            return key;
        }
        match self.table.lookup(key, self.language) {
            Some(text) => {
                self.metrics.record_lookup(false);
                text
            }
            None => {
                self.metrics.record_lookup(true);
                key
            }
        }
    }

    /// Owned version of `resolve`.
    pub fn get_text(&self, key: &str) -> String {
        self.resolve(key).to_string()
    }
}

/// A subscriber whose handler failed during a notification round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFailure {
    /// Position of the subscriber in registration order
    pub position: usize,
    pub reason: String,
}

/// Outcome of one notification round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReport {
    pub language: Language,

    /// True when the language was already current and nobody was notified
    pub skipped: bool,

    /// Number of handlers that completed successfully
    pub notified: usize,

    pub failures: Vec<NotificationFailure>,
}

impl NotificationReport {
    fn new(language: Language) -> Self {
        Self {
            language,
            skipped: false,
            notified: 0,
            failures: Vec::new(),
        }
    }

    fn skipped(language: Language) -> Self {
        Self {
            skipped: true,
            ..Self::new(language)
        }
    }

    /// Check if any subscriber failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Owner of the translation table and of the subscriber set.
pub struct LocalizationRegistry {
    settings: RegistrySettings,
    current: Language,
    initialized: bool,
    table: TranslationTable,
    subscribers: Vec<Weak<RefCell<dyn Localizable>>>,
    metrics: LocalizationMetrics,
}

impl LocalizationRegistry {
    /// Create an uninitialized registry with an empty table.
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            settings,
            current: settings.default_language,
            initialized: false,
            table: TranslationTable::new(),
            subscribers: Vec::new(),
            metrics: LocalizationMetrics::new(),
        }
    }

    /// Load translation sources and select the default language.
    ///
    /// Runs once per lifecycle cycle; later calls return `false` and change
    /// nothing. Sources are merged in order, later ones overwriting earlier
    /// keys. A source that fails to load is logged and skipped. Subscribers
    /// registered before initialization are refreshed against the new table.
    ///
    /// # Returns
    /// `true` if this call performed the initialization
    pub fn initialize<I>(&mut self, sources: I) -> bool
    where
        I: IntoIterator,
        I::Item: TranslationSource,
    {
        if self.initialized {
            debug!("Localization registry already initialized");
            return false;
        }

        let mut loaded = 0;
        let mut failed = 0;
        for source in sources {
            match source.load() {
                Ok(entries) => {
                    let count = entries.len();
                    let replaced = self.table.merge(entries);
                    loaded += 1;
                    info!(
                        "Loaded {} translations from '{}' ({} overwritten)",
                        count,
                        source.name(),
                        replaced
                    );
                }
                Err(e) => {
                    failed += 1;
                    warn!("Skipping translation source: {}", e);
                }
            }
        }

        self.current = self.settings.default_language;
        self.initialized = true;
        info!(
            "✓ Localization initialized: {} keys from {} sources ({} failed), language {}",
            self.table.len(),
            loaded,
            failed,
            self.current
        );

        if self.subscriber_count() > 0 {
            self.notify_all();
        }
        true
    }

    /// Drop all subscribers and translations and return to the uninitialized
    /// state.
    pub fn teardown(&mut self) {
        info!(
            "Tearing down localization ({} subscribers, {} keys)",
            self.subscriber_count(),
            self.table.len()
        );
        self.subscribers.clear();
        self.table.clear();
        self.current = self.settings.default_language;
        self.initialized = false;
    }

    /// Switch language and notify every subscriber.
    ///
    /// Does nothing when `language` is already current. A subscriber whose
    /// handler fails is reported and skipped; the others are still notified.
    pub fn set_language(&mut self, language: Language) -> NotificationReport {
        if language == self.current {
            self.metrics.record_skipped_switch();
            debug!("Language already {}, nothing to notify", language);
            return NotificationReport::skipped(language);
        }

        info!("Switching language {} -> {}", self.current, language);
        self.current = language;
        self.metrics.record_language_switch();
        self.notify_all()
    }

    /// `set_language` by stable integer index.
    pub fn set_language_index(&mut self, index: i64) -> Result<NotificationReport> {
        let language = Language::from_index(index)?;
        Ok(self.set_language(language))
    }

    /// Re-notify every subscriber with the current language.
    pub fn refresh(&mut self) -> NotificationReport {
        self.notify_all()
    }

    /// Add `element` to the subscriber set.
    ///
    /// Does not notify; the caller applies the current language itself.
    ///
    /// # Returns
    /// `false` if the element was already registered
    pub fn register(&mut self, element: &SharedElement) -> bool {
        self.prune();
        if self.position_of(element).is_some() {
            debug!("Element already registered, ignoring");
            return false;
        }
        self.subscribers.push(Rc::downgrade(element));
        true
    }

    /// Remove `element` from the subscriber set.
    ///
    /// # Returns
    /// `false` if the element was not registered
    pub fn unregister(&mut self, element: &SharedElement) -> bool {
        self.prune();
        match self.position_of(element) {
            Some(position) => {
                self.subscribers.remove(position);
                true
            }
            None => false,
        }
    }

    /// Check if `element` is in the subscriber set.
    pub fn is_registered(&self, element: &SharedElement) -> bool {
        self.position_of(element).is_some()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|subscriber| subscriber.strong_count() > 0)
            .count()
    }

    /// Resolve `key` under the current language. Never fails.
    pub fn get_text(&self, key: &str) -> String {
        self.resolver().get_text(key)
    }

    /// Read-only view for resolving text outside of a notification.
    pub fn resolver(&self) -> TextResolver<'_> {
        TextResolver {
            language: self.current,
            source_language: self.settings.source_language,
            table: &self.table,
            metrics: &self.metrics,
        }
    }

    /// Get the current language.
    pub fn current_language(&self) -> Language {
        self.current
    }

    /// Get the configured source language.
    pub fn source_language(&self) -> Language {
        self.settings.source_language
    }

    /// Get the settings the registry was created with.
    pub fn settings(&self) -> RegistrySettings {
        self.settings
    }

    /// Check if `initialize` has run in this lifecycle cycle.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get the loaded translation table.
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Get the lookup and notification counters.
    pub fn metrics(&self) -> &LocalizationMetrics {
        &self.metrics
    }

    fn position_of(&self, element: &SharedElement) -> Option<usize> {
        let target = Rc::as_ptr(element);
        self.subscribers
            .iter()
            .position(|subscriber| std::ptr::addr_eq(subscriber.as_ptr(), target))
    }

    fn prune(&mut self) {
        self.subscribers
            .retain(|subscriber| subscriber.strong_count() > 0);
    }

    fn notify_all(&mut self) -> NotificationReport {
        self.prune();

        let resolver = self.resolver();
        let mut report = NotificationReport::new(self.current);

        for (position, subscriber) in self.subscribers.iter().enumerate() {
            let Some(element) = subscriber.upgrade() else {
                continue;
            };

            let outcome = match element.try_borrow_mut() {
                Ok(mut element) => element
                    .on_language_change(&resolver)
                    .map_err(|e| e.to_string()),
                Err(_) => Err("element is borrowed elsewhere".to_string()),
            };

            match outcome {
                Ok(()) => {
                    report.notified += 1;
                    self.metrics.record_notification();
                }
                Err(reason) => {
                    warn!(
                        "✗ Subscriber {} failed to apply {}: {}",
                        position, self.current, reason
                    );
                    self.metrics.record_notification_failure();
                    report
                        .failures
                        .push(NotificationFailure { position, reason });
                }
            }
        }

        debug!(
            "Notified {} subscribers of {} ({} failed)",
            report.notified,
            self.current,
            report.failures.len()
        );
        report
    }
}

impl Default for LocalizationRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}
