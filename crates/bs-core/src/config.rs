use crate::error::{BsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest phrase window the codec will accept.
pub const MAX_PHRASE_WINDOW: usize = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSpeakConfig {
    pub dictionary: DictionaryConfig,
    pub codec: CodecConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionarySourceKind {
    #[default]
    Builtin,
    JsonFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub source: DictionarySourceKind,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_phrase_words: usize,
    pub track_usage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_random: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_phrase_words: 4,
            track_usage: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_random: 50,
        }
    }
}

impl BotSpeakConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let window = self.codec.max_phrase_words;
        if !(2..=MAX_PHRASE_WINDOW).contains(&window) {
            return Err(BsError::Config(format!(
                "codec.max_phrase_words must be within 2..={MAX_PHRASE_WINDOW}, got {window}"
            )));
        }
        if self.dictionary.source == DictionarySourceKind::JsonFile && self.dictionary.path.is_none() {
            return Err(BsError::Config("dictionary.path is required for the json_file source".into()));
        }
        if self.search.default_limit == 0 {
            return Err(BsError::Config("search.default_limit must be positive".into()));
        }
        Ok(())
    }
}
