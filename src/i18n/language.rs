//! Language type: the fixed, ordered set of languages the UI can display.
//!
//! Languages are a closed enum so that every value the registry holds is valid
//! by construction. Adding a language means adding a variant and its row in
//! `LANGUAGES`.

use crate::error::{LocalizationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A display language.
///
/// Serialized as its ISO 639-1 code. Deserializes from either the code or the
/// stable integer index, since authored element data stores languages as
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LanguageRepr", into = "&'static str")]
pub enum Language {
    Zh,
    En,
    Ja,
    Fr,
}

/// Metadata for a supported language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInfo {
    /// ISO 639-1 language code (e.g., "zh", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Chinese", "Japanese")
    pub name: &'static str,

    /// Native name of the language (e.g., "中文", "日本語")
    pub native_name: &'static str,
}

/// Metadata rows, indexed by `Language as usize`.
static LANGUAGES: [LanguageInfo; 4] = [
    LanguageInfo {
        code: "zh",
        name: "Chinese",
        native_name: "中文",
    },
    LanguageInfo {
        code: "en",
        name: "English",
        native_name: "English",
    },
    LanguageInfo {
        code: "ja",
        name: "Japanese",
        native_name: "日本語",
    },
    LanguageInfo {
        code: "fr",
        name: "French",
        native_name: "Français",
    },
];

impl Language {
    /// Every language, in index order.
    pub const ALL: [Language; 4] = [Language::Zh, Language::En, Language::Ja, Language::Fr];

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "en", "ja"); case-insensitive
    ///
    /// # Returns
    /// * `Ok(Language)` if the code names a known language
    /// * `Err(UnknownLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LocalizationError::UnknownLanguage(code.to_string()))
    }

    /// Create a Language from its stable integer index.
    pub fn from_index(index: i64) -> Result<Language> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| LocalizationError::UnknownLanguage(index.to_string()))
    }

    /// Stable integer index, as stored by authored element data.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the metadata row of this language.
    pub fn info(self) -> &'static LanguageInfo {
        &LANGUAGES[self.index()]
    }

    /// Get the ISO 639-1 language code.
    pub fn code(self) -> &'static str {
        self.info().code
    }

    /// Get the English name of the language.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Get the native name of the language.
    pub fn native_name(self) -> &'static str {
        self.info().native_name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LocalizationError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

impl From<Language> for &'static str {
    fn from(lang: Language) -> Self {
        lang.code()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageRepr {
    Code(String),
    Index(i64),
}

impl TryFrom<LanguageRepr> for Language {
    type Error = LocalizationError;

    fn try_from(repr: LanguageRepr) -> Result<Self> {
        match repr {
            LanguageRepr::Code(code) => Language::from_code(&code),
            LanguageRepr::Index(index) => Language::from_index(index),
        }
    }
}
