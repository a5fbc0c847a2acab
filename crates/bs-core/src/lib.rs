//! Shared BotSpeak types, error taxonomy and configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::BotSpeakConfig;
pub use error::{BsError, Result};
pub use types::{CodeFamily, DictionaryEntry, DictionaryMatch, DictionaryStats};
