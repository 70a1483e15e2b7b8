//! Localization metrics and observability module.
//!
//! This module tracks how the registry is used: text lookups and how many of
//! them fell back to the key, language switches, and notification delivery.
//! Each registry owns its own counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one `LocalizationRegistry`.
#[derive(Debug, Default)]
pub struct LocalizationMetrics {
    /// Number of `get_text` resolutions, source language included
    lookups: AtomicUsize,

    /// Number of resolutions that returned the key because no translation existed
    fallbacks: AtomicUsize,

    /// Number of language switches that changed the current language
    language_switches: AtomicUsize,

    /// Number of `set_language` calls ignored because the language was already current
    skipped_switches: AtomicUsize,

    /// Number of handler invocations that succeeded
    notifications: AtomicUsize,

    /// Number of handler invocations that failed
    notification_failures: AtomicUsize,
}

impl LocalizationMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text lookup; `fallback` is true when the key was returned as-is
    /// for lack of a translation.
    pub fn record_lookup(&self, fallback: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a switch to a different language.
    pub fn record_language_switch(&self) {
        self.language_switches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a switch to the language that was already current.
    pub fn record_skipped_switch(&self) {
        self.skipped_switches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a subscriber that applied a language change.
    pub fn record_notification(&self) {
        self.notifications.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a subscriber whose handler failed.
    pub fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of lookups.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Get the number of lookups that fell back to the key.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Get the number of effective language switches.
    pub fn language_switches(&self) -> usize {
        self.language_switches.load(Ordering::Relaxed)
    }

    /// Get the number of ignored same-language switches.
    pub fn skipped_switches(&self) -> usize {
        self.skipped_switches.load(Ordering::Relaxed)
    }

    /// Get the number of successful notifications.
    pub fn notifications(&self) -> usize {
        self.notifications.load(Ordering::Relaxed)
    }

    /// Get the number of failed notifications.
    pub fn notification_failures(&self) -> usize {
        self.notification_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let fallbacks = self.fallbacks();
        let translation_hit_rate = if lookups > 0 {
            ((lookups - fallbacks) as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            fallbacks,
            translation_hit_rate,
            language_switches: self.language_switches(),
            skipped_switches: self.skipped_switches(),
            notifications: self.notifications(),
            notification_failures: self.notification_failures(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.language_switches.store(0, Ordering::Relaxed);
        self.skipped_switches.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
        self.notification_failures.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the localization counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub fallbacks: usize,

    /// Share of lookups that did not fall back to the key, as a percentage (0-100)
    pub translation_hit_rate: f64,

    pub language_switches: usize,
    pub skipped_switches: usize,
    pub notifications: usize,
    pub notification_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_lookup() {
        let metrics = LocalizationMetrics::new();

        metrics.record_lookup(false);
        metrics.record_lookup(true);

        assert_eq!(metrics.lookups(), 2);
        assert_eq!(metrics.fallbacks(), 1);
    }

    #[test]
    fn test_record_switches() {
        let metrics = LocalizationMetrics::new();

        metrics.record_language_switch();
        metrics.record_skipped_switch();
        metrics.record_skipped_switch();

        assert_eq!(metrics.language_switches(), 1);
        assert_eq!(metrics.skipped_switches(), 2);
    }

    #[test]
    fn test_record_notifications() {
        let metrics = LocalizationMetrics::new();

        metrics.record_notification();
        metrics.record_notification_failure();

        assert_eq!(metrics.notifications(), 1);
        assert_eq!(metrics.notification_failures(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LocalizationMetrics::new().report();

        assert_eq!(report.lookups, 0);
        assert_eq!(report.translation_hit_rate, 0.0);
        assert_eq!(report.notifications, 0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = LocalizationMetrics::new();

        // 3 translated, 1 fallback = 75% hit rate
        metrics.record_lookup(false);
        metrics.record_lookup(false);
        metrics.record_lookup(false);
        metrics.record_lookup(true);

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.translation_hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LocalizationMetrics::new();
        metrics.record_language_switch();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["language_switches"], 1);
    }

    #[test]
    fn test_reset() {
        let metrics = LocalizationMetrics::new();
        metrics.record_lookup(true);
        metrics.record_notification();

        metrics.reset();

        assert_eq!(metrics.lookups(), 0);
        assert_eq!(metrics.fallbacks(), 0);
        assert_eq!(metrics.notifications(), 0);
    }
}
