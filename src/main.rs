//! Localization preview: loads the configured translation sources, builds the
//! optional scene and shows every element in every language.
//!
//! Usage:
//!   cargo run                      # Preview with settings from .env
//!   cargo run -- --strict          # Exit with an error if validation finds errors
//!
//! Environment variables (all optional):
//! - LOCALIZATION_DIR (defaults to data/translations)
//! - LOCALIZATION_SOURCES (comma-separated source names)
//! - LOCALIZATION_SOURCE_LANGUAGE (defaults to zh)
//! - LOCALIZATION_DEFAULT_LANGUAGE (defaults to the source language)
//! - LOCALIZATION_SCENE (scene JSON to preview)

use anyhow::{Context, Result};
use tracing::{info, warn};
use ui_localization::config::Config;
use ui_localization::i18n::{
    JsonFileSource, Language, LocalizationRegistry, TranslationValidator, ValidationReport,
};
use ui_localization::scene::{load_scene, Scene, SceneSpec};

fn log_report(label: &str, report: &ValidationReport) {
    for error in &report.errors {
        warn!("✗ {}: {}", label, error);
    }
    for warning in &report.warnings {
        warn!("⚠ {}: {}", label, warning);
    }
    if report.is_clean() {
        info!("✓ {} is clean", label);
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ui_localization=info".parse()?),
        )
        .init();

    let strict = std::env::args().any(|arg| arg == "--strict");

    info!("Loading configuration...");
    let config = Config::from_env()?;

    // Step 1: Load translation sources
    let sources =
        JsonFileSource::from_names(&config.translation_dir, config.sources.iter().cloned());
    if sources.is_empty() {
        warn!("LOCALIZATION_SOURCES is empty, every key will display as itself");
    }
    let mut registry = LocalizationRegistry::new(config.registry_settings());
    registry.initialize(&sources);

    // Step 2: Validate translations
    let mut report =
        TranslationValidator::validate_table(registry.table(), registry.source_language());
    log_report("Translation table", &report);

    // Step 3: Build the scene
    let spec = match &config.scene_path {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No LOCALIZATION_SCENE set, previewing translations only");
            SceneSpec::default()
        }
    };
    let scene_report = spec.validate();
    log_report("Scene overrides", &scene_report);
    report.merge(scene_report);

    let mut scene = Scene::build(&spec, &mut registry);

    // Step 4: Cycle through every language
    for language in Language::ALL {
        let notification = registry.set_language(language);
        if notification.skipped {
            info!(
                "=== {} ({}) - already current ===",
                language.name(),
                language.native_name()
            );
        } else {
            info!(
                "=== {} ({}) - {} elements updated ===",
                language.name(),
                language.native_name(),
                notification.notified
            );
        }
        for failure in &notification.failures {
            warn!("Element {} failed: {}", failure.position, failure.reason);
        }
        for line in scene.describe() {
            info!("  {}", line);
        }
    }

    scene.detach_all(&mut registry);

    let metrics = serde_json::to_string_pretty(&registry.metrics().report())?;
    info!("Localization metrics:\n{}", metrics);

    if strict && report.has_errors() {
        anyhow::bail!("Validation found {} errors", report.errors.len());
    }

    Ok(())
}
