//! Error type shared by the localization library.
//!
//! Missing translations are never errors: lookups fall back to the key. The
//! variants here cover the edges where something genuinely went wrong: a
//! translation source could not be read, a persisted value named a language
//! that does not exist, or an element could not be built.

use crate::element::ElementKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalizationError {
    /// A translation source could not be read from storage
    #[error("failed to read translation source '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A translation source was read but is not valid JSON of the expected shape
    #[error("failed to parse translation source '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A language code or index does not match any known language
    #[error("unknown language: '{0}'")]
    UnknownLanguage(String),

    /// Translation entries must have a non-empty key
    #[error("translation entry key must not be empty")]
    EmptyKey,

    /// An element was constructed without the visual surface it requires
    #[error("{kind} element has no {surface} to drive")]
    MissingSurface {
        kind: ElementKind,
        surface: &'static str,
    },

    /// A subscriber failed while handling a language change
    #[error("{kind} element failed to apply language change: {message}")]
    Handler { kind: ElementKind, message: String },
}

pub type Result<T> = std::result::Result<T, LocalizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_display() {
        let err = LocalizationError::UnknownLanguage("xx".to_string());
        assert_eq!(err.to_string(), "unknown language: 'xx'");
    }

    #[test]
    fn test_missing_surface_display_names_kind() {
        let err = LocalizationError::MissingSurface {
            kind: ElementKind::MeshText,
            surface: "text mesh",
        };
        assert_eq!(err.to_string(), "mesh-text element has no text mesh to drive");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = LocalizationError::Io {
            name: "ui_tran".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("ui_tran"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
