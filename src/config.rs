use crate::i18n::{Language, RegistrySettings};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translation sources
    pub translation_dir: PathBuf,
    pub sources: Vec<String>,

    // Languages
    pub source_language: Language,
    pub default_language: Language,

    // Preview
    pub scene_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, or `None` when unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source_language = match lookup("LOCALIZATION_SOURCE_LANGUAGE") {
            Some(code) => Language::from_code(&code)
                .context("LOCALIZATION_SOURCE_LANGUAGE is not a known language")?,
            None => Language::Zh,
        };

        let default_language = match lookup("LOCALIZATION_DEFAULT_LANGUAGE") {
            Some(code) => Language::from_code(&code)
                .context("LOCALIZATION_DEFAULT_LANGUAGE is not a known language")?,
            None => source_language,
        };

        Ok(Self {
            translation_dir: lookup("LOCALIZATION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/translations")),
            sources: lookup("LOCALIZATION_SOURCES")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            source_language,
            default_language,
            scene_path: lookup("LOCALIZATION_SCENE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Library-side settings for `LocalizationRegistry::new`.
    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            source_language: self.source_language,
            default_language: self.default_language,
        }
    }
}
