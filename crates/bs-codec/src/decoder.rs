//! Code → text decoding with optional unknown-code accounting.

use crate::code::normalize_code;
use crate::encoder::SENTENCE_SEPARATOR;
use crate::stats::round_to;
use bs_core::CodeFamily;
use bs_dictionary::DictionaryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a validating decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeReport {
    pub decoded_text: String,
    /// True when every token was recognized.
    pub success: bool,
    pub unknown_codes: Vec<String>,
    pub total_codes: usize,
    pub recognized_codes: usize,
    /// Percentage of recognized tokens, 2 decimals; 100 when there were none.
    pub recognition_rate: f64,
}

impl DecodeReport {
    fn empty() -> Self {
        Self {
            decoded_text: String::new(),
            success: true,
            unknown_codes: Vec::new(),
            total_codes: 0,
            recognized_codes: 0,
            recognition_rate: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDecodeItem {
    pub index: usize,
    pub input: String,
    #[serde(flatten)]
    pub report: DecodeReport,
}

/// Result of looking up a single code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeInfo {
    /// The canonical code when valid, otherwise the input as given.
    pub code: String,
    pub valid: bool,
    pub text: Option<String>,
    pub code_type: Option<CodeFamily>,
    /// Human-readable family label, e.g. `numeric (common words/phrases)`.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnknownPolicy {
    /// Keep the token verbatim; it may be an unencoded word.
    Keep,
    /// Mark as `[token]` and report it.
    Report,
}

#[derive(Debug, Clone)]
pub struct Decoder {
    store: Arc<DictionaryStore>,
}

impl Decoder {
    pub fn new(store: Arc<DictionaryStore>) -> Self {
        Self { store }
    }

    /// Decode codes to text, passing unknown tokens through unchanged.
    pub fn decode_codes(&self, encoded: &str) -> String {
        if encoded.trim().is_empty() {
            return String::new();
        }
        self.walk(encoded, UnknownPolicy::Keep).decoded_text
    }

    /// Decode codes to text, bracketing and reporting unknown tokens.
    pub fn decode_with_validation(&self, encoded: &str) -> DecodeReport {
        if encoded.trim().is_empty() {
            return DecodeReport::empty();
        }
        self.walk(encoded, UnknownPolicy::Report)
    }

    pub fn decode_batch<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<BatchDecodeItem> {
        inputs
            .iter()
            .enumerate()
            .map(|(index, input)| BatchDecodeItem {
                index,
                input: input.as_ref().to_string(),
                report: self.decode_with_validation(input.as_ref()),
            })
            .collect()
    }

    pub fn lookup_code(&self, code: &str) -> CodeInfo {
        let normalized = normalize_code(code);
        match self.store.get(&normalized) {
            Some(entry) => {
                let family = entry.family();
                CodeInfo {
                    code: normalized,
                    valid: true,
                    text: Some(entry.text.clone()),
                    code_type: family,
                    description: family.map(|f| f.description().to_string()),
                }
            }
            None => CodeInfo {
                code: code.to_string(),
                valid: false,
                text: None,
                code_type: None,
                description: None,
            },
        }
    }

    fn walk(&self, encoded: &str, policy: UnknownPolicy) -> DecodeReport {
        let mut sentences: Vec<String> = Vec::new();
        let mut unknown_codes = Vec::new();
        let mut total = 0usize;
        let mut recognized = 0usize;

        for sentence in encoded.split(SENTENCE_SEPARATOR) {
            let mut words: Vec<String> = Vec::new();
            for token in sentence.split_whitespace() {
                total += 1;
                match self.store.text_for(&normalize_code(token)) {
                    Some(text) => {
                        recognized += 1;
                        words.push(text.to_string());
                    }
                    None => match policy {
                        UnknownPolicy::Keep => words.push(token.to_string()),
                        UnknownPolicy::Report => {
                            words.push(format!("[{token}]"));
                            unknown_codes.push(token.to_string());
                        }
                    },
                }
            }
            if !words.is_empty() {
                sentences.push(capitalize_first(&words.join(" ")));
            }
        }

        let mut decoded_text = sentences.join(". ");
        if !decoded_text.is_empty() && !decoded_text.ends_with('.') {
            decoded_text.push('.');
        }

        let recognition_rate = if total > 0 {
            round_to(recognized as f64 / total as f64 * 100.0, 2)
        } else {
            100.0
        };

        DecodeReport {
            decoded_text,
            success: unknown_codes.is_empty(),
            unknown_codes,
            total_codes: total,
            recognized_codes: recognized,
            recognition_rate,
        }
    }
}

fn capitalize_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
