//! Multi-word phrase → code index used for greedy longest-match encoding.

use bs_dictionary::DictionaryStore;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub phrase: String,
    pub code: String,
    pub word_count: usize,
}

/// Lowercase phrases of 2..=`max_words` words, keyed for O(1) lookup per
/// candidate length.
#[derive(Debug, Clone, Default)]
pub struct PhraseIndex {
    /// Word count descending, then code ascending.
    entries: Vec<PhraseEntry>,
    by_phrase: HashMap<String, usize>,
    max_words: usize,
}

impl PhraseIndex {
    pub fn build(store: &DictionaryStore, max_words: usize) -> Self {
        // Store entries are already ordered by code, so on a lowercase
        // collision the smaller code is kept.
        let mut entries: Vec<PhraseEntry> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for entry in store.entries() {
            if !entry.is_phrase() || entry.word_count > max_words {
                continue;
            }
            let phrase = entry.text.to_lowercase();
            if !seen.insert(phrase.clone()) {
                continue;
            }
            entries.push(PhraseEntry {
                phrase,
                code: entry.code.clone(),
                word_count: entry.word_count,
            });
        }
        entries.sort_by(|a, b| b.word_count.cmp(&a.word_count).then_with(|| a.code.cmp(&b.code)));

        let by_phrase = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.phrase.clone(), idx))
            .collect();

        Self { entries, by_phrase, max_words }
    }

    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.by_phrase.get(phrase).map(|&idx| self.entries[idx].code.as_str())
    }

    /// Phrases ordered longest first.
    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }
}
