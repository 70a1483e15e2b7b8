//! Translation sources: where the registry's table comes from.
//!
//! A source is anything that can produce a batch of `TranslationEntry` rows.
//! Storage is the host's concern; this module ships a JSON file loader and an
//! in-memory source.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "1": { "key": "开始游戏", "en": "Start", "ja": "スタート" },
//!   "2": { "key": "设置", "en": "Settings" }
//! }
//! ```
//!
//! A bare array of the same records is accepted too. Records are merged in
//! the order they are written, whatever their ids. Columns that are not a
//! known language code are ignored.

use crate::error::{LocalizationError, Result};
use crate::i18n::{Language, TranslationEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A named provider of translation entries.
pub trait TranslationSource {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Load every entry of this source, in source order.
    fn load(&self) -> Result<Vec<TranslationEntry>>;
}

impl<T: TranslationSource + ?Sized> TranslationSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Vec<TranslationEntry>> {
        (**self).load()
    }
}

impl<T: TranslationSource + ?Sized> TranslationSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Vec<TranslationEntry>> {
        (**self).load()
    }
}

/// Reads `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
    /// Source for `<dir>/<name>.json`.
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = dir.as_ref().join(format!("{}.json", name));
        Self { name, path }
    }

    /// One source per name, all in the same folder.
    pub fn from_names<I, S>(dir: impl AsRef<Path>, names: I) -> Vec<JsonFileSource>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|name| JsonFileSource::new(dir.as_ref(), name))
            .collect()
    }

    /// Get the file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranslationSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<TranslationEntry>> {
        debug!("Reading translation source {}", self.path.display());
        let content = std::fs::read_to_string(&self.path).map_err(|source| LocalizationError::Io {
            name: self.name.clone(),
            source,
        })?;
        parse_entries(&self.name, &content)
    }
}

/// Entries held in memory, mostly for tests and embedded tables.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    entries: Vec<TranslationEntry>,
}

impl MemorySource {
    /// Source serving `entries` as-is.
    pub fn new(name: impl Into<String>, entries: Vec<TranslationEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Parse a JSON document up front.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let name = name.into();
        let entries = parse_entries(&name, json)?;
        Ok(Self { name, entries })
    }
}

impl TranslationSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<TranslationEntry>> {
        Ok(self.entries.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    key: String,
    #[serde(flatten)]
    columns: BTreeMap<String, serde_json::Value>,
}

/// Keyed documents stay a `serde_json::Map`, which keeps document order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Keyed(serde_json::Map<String, serde_json::Value>),
    List(Vec<RawRecord>),
}

/// Parse a JSON translation document into entries.
///
/// Records with an empty key are skipped with a warning. Unknown columns and
/// non-string values are skipped silently (logged at debug level).
pub fn parse_entries(name: &str, json: &str) -> Result<Vec<TranslationEntry>> {
    let parse_error = |source| LocalizationError::Parse {
        name: name.to_string(),
        source,
    };

    let document: RawDocument = serde_json::from_str(json).map_err(parse_error)?;

    let records: Vec<RawRecord> = match document {
        RawDocument::Keyed(map) => map
            .into_iter()
            .map(|(_, record)| serde_json::from_value(record))
            .collect::<std::result::Result<_, _>>()
            .map_err(parse_error)?,
        RawDocument::List(list) => list,
    };

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let mut entry = match TranslationEntry::new(record.key) {
            Ok(entry) => entry,
            Err(_) => {
                warn!("{}: skipping translation record with empty key", name);
                continue;
            }
        };

        for (column, value) in record.columns {
            let Ok(language) = Language::from_code(&column) else {
                debug!("{}: ignoring column '{}' of '{}'", name, column, entry.key());
                continue;
            };
            match value {
                serde_json::Value::String(text) => entry.set(language, text),
                other => debug!(
                    "{}: ignoring non-string {} value of '{}': {}",
                    name,
                    language,
                    entry.key(),
                    other
                ),
            }
        }
        entries.push(entry);
    }

    Ok(entries)
}
