//! Sentence segmentation on runs of `.`, `!` and `?`.

use regex::Regex;
use std::sync::LazyLock;

static TERMINATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Non-blank sentence fragments of `text`, in order.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    TERMINATOR_RE.split(text).filter(|s| !s.trim().is_empty())
}
