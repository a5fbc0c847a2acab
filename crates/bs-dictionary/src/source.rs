//! Dictionary collaborators: where a snapshot's entries come from.

use crate::builtin::builtin_entries;
use crate::store::DictionaryStore;
use bs_core::config::{DictionaryConfig, DictionarySourceKind};
use bs_core::{BsError, DictionaryEntry, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Supplies the full set of dictionary entries on demand.
///
/// Each call returns a fresh copy; the codec treats the result as frozen.
pub trait DictionarySource: Send + Sync {
    fn name(&self) -> &str;

    /// Entries keyed implicitly by code (`code -> text`).
    fn get_dictionary(&self) -> Result<Vec<DictionaryEntry>>;

    /// `text -> code`, derived from [`get_dictionary`](Self::get_dictionary).
    fn get_reverse_dictionary(&self) -> Result<BTreeMap<String, String>> {
        Ok(self
            .get_dictionary()?
            .into_iter()
            .map(|e| (e.text, e.code))
            .collect())
    }
}

/// Fetch entries from `source` and validate them into a store.
pub fn load_store(source: &dyn DictionarySource) -> Result<DictionaryStore> {
    let entries = source.get_dictionary()?;
    if entries.is_empty() {
        return Err(BsError::unavailable(source.name(), "no entries supplied"));
    }
    let store = DictionaryStore::from_entries(entries)?;
    tracing::debug!(source = source.name(), entries = store.len(), "dictionary loaded");
    Ok(store)
}

/// In-memory entries, either the built-in table or caller supplied.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    entries: Option<Vec<DictionaryEntry>>,
}

impl StaticSource {
    pub fn builtin() -> Self {
        Self { name: "builtin".into(), entries: None }
    }

    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { name: "static".into(), entries: Some(entries) }
    }

    pub fn from_pairs<C, T>(pairs: impl IntoIterator<Item = (C, T)>) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(c, t)| DictionaryEntry::new(c, t)).collect())
    }
}

impl DictionarySource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_dictionary(&self) -> Result<Vec<DictionaryEntry>> {
        match &self.entries {
            Some(entries) => Ok(entries.clone()),
            None => builtin_entries(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryFile {
    Entries(Vec<DictionaryEntry>),
    Map(BTreeMap<String, String>),
}

/// Reads entries from a JSON file on every fetch.
///
/// Accepts either `[{"code": .., "text": .., "frequency": ..}, ..]` or
/// `{"<code>": "<text>", ..}`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json_file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_dictionary(&self) -> Result<Vec<DictionaryEntry>> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| BsError::unavailable(&self.name, e.to_string()))?;
        let parsed: DictionaryFile = serde_json::from_str(&raw)
            .map_err(|e| BsError::unavailable(&self.name, e.to_string()))?;
        Ok(match parsed {
            DictionaryFile::Entries(entries) => entries,
            DictionaryFile::Map(map) => map
                .into_iter()
                .map(|(code, text)| DictionaryEntry::new(code, text))
                .collect(),
        })
    }
}

/// Pick the collaborator named by configuration.
pub fn source_from_config(config: &DictionaryConfig) -> Result<Box<dyn DictionarySource>> {
    match config.source {
        DictionarySourceKind::Builtin => Ok(Box::new(StaticSource::builtin())),
        DictionarySourceKind::JsonFile => {
            let path = config
                .path
                .clone()
                .ok_or_else(|| BsError::Config("dictionary.path is required for the json_file source".into()))?;
            Ok(Box::new(JsonFileSource::new(path)))
        }
    }
}
