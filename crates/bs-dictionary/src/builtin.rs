//! Built-in dictionary table: numeric 100-999, alphanumeric A01-Z99 and
//! 4-digit 0004-0999 codes.

use bs_core::{DictionaryEntry, Result};
use std::sync::LazyLock;

const BUILTIN_JSON: &str = include_str!("../data/builtin.json");

static BUILTIN_ENTRIES: LazyLock<std::result::Result<Vec<DictionaryEntry>, String>> =
    LazyLock::new(|| serde_json::from_str(BUILTIN_JSON).map_err(|e| e.to_string()));

/// Parsed built-in entries.
pub fn builtin_entries() -> Result<Vec<DictionaryEntry>> {
    match &*BUILTIN_ENTRIES {
        Ok(entries) => Ok(entries.clone()),
        Err(reason) => Err(bs_core::BsError::unavailable("builtin", reason.clone())),
    }
}
