//! Text normalization ahead of tokenization.

use regex::Regex;
use std::sync::LazyLock;

/// Contraction expansions, applied in order as plain substring replacement.
/// Earlier entries win where patterns overlap, so the order is significant.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("won't", "will not"),
    ("can't", "cannot"),
    ("n't", " not"),
    ("'re", " are"),
    ("'ve", " have"),
    ("'ll", " will"),
    ("'d", " would"),
    ("'m", " am"),
    ("'s", " is"),
];

static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s.!?]").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase, expand contractions, strip punctuation other than sentence
/// terminators and collapse whitespace.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = text.to_lowercase();
    for (contraction, expansion) in CONTRACTIONS {
        if result.contains(contraction) {
            result = result.replace(contraction, expansion);
        }
    }
    let result = STRIP_RE.replace_all(&result, " ");
    SPACE_RE.replace_all(&result, " ").trim().to_string()
}
