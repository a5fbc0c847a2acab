//! Immutable code ↔ text snapshot with exact forward and reverse lookup.

use bs_core::{BsError, CodeFamily, DictionaryEntry, DictionaryMatch, DictionaryStats, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Validated dictionary snapshot. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    /// Sorted by code.
    entries: Vec<DictionaryEntry>,
    by_code: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
}

impl DictionaryStore {
    /// Build a store, rejecting an empty entry list, duplicate codes,
    /// duplicate texts and codes outside the three families.
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(BsError::unavailable("entries", "no entries supplied"));
        }
        let mut entries = entries;
        for entry in &mut entries {
            entry.code = entry.code.trim().to_string();
            if entry.text.trim().is_empty() {
                return Err(BsError::InvalidEntry {
                    code: entry.code.clone(),
                    reason: "text is blank".into(),
                });
            }
            if CodeFamily::of(&entry.code).is_none() {
                return Err(BsError::InvalidEntry {
                    code: entry.code.clone(),
                    reason: "code matches no code family".into(),
                });
            }
            entry.word_count = entry.text.split_whitespace().count();
        }
        entries.sort_by(|a, b| a.code.cmp(&b.code));

        let mut by_code = HashMap::with_capacity(entries.len());
        let mut by_text: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_code.insert(entry.code.clone(), idx).is_some() {
                return Err(BsError::DuplicateCode { code: entry.code.clone() });
            }
            if let Some(prev) = by_text.insert(entry.text.clone(), idx) {
                return Err(BsError::DuplicateText {
                    text: entry.text.clone(),
                    first: entries[prev].code.clone(),
                    second: entry.code.clone(),
                });
            }
        }

        Ok(Self { entries, by_code, by_text })
    }

    /// Build from `(code, text)` pairs.
    pub fn from_pairs<C, T>(pairs: impl IntoIterator<Item = (C, T)>) -> Result<Self>
    where
        C: Into<String>,
        T: Into<String>,
    {
        Self::from_entries(pairs.into_iter().map(|(c, t)| DictionaryEntry::new(c, t)).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by code.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&DictionaryEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn text_for(&self, code: &str) -> Option<&str> {
        self.get(code).map(|e| e.text.as_str())
    }

    /// Exact (case-sensitive) reverse lookup.
    pub fn code_for(&self, text: &str) -> Option<&str> {
        self.by_text.get(text).map(|&idx| self.entries[idx].code.as_str())
    }

    /// `code -> text`
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().map(|e| (e.code.clone(), e.text.clone())).collect()
    }

    /// `text -> code`
    pub fn reverse_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().map(|e| (e.text.clone(), e.code.clone())).collect()
    }

    /// Case-insensitive search over codes and texts. The query is matched
    /// as given, surrounding whitespace included.
    ///
    /// Candidates are gathered in three tiers (exact, prefix, substring) until
    /// `limit` is reached, then ordered by frequency descending and code.
    pub fn search(&self, query: &str, limit: usize) -> Vec<DictionaryMatch> {
        let term = query.to_lowercase();
        if term.is_empty() || limit == 0 {
            return Vec::new();
        }

        let lowered: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|e| (e.code.to_lowercase(), e.text.to_lowercase()))
            .collect();
        let mut picked = vec![false; self.entries.len()];
        let mut results: Vec<DictionaryMatch> = Vec::new();
        'tiers: for tier in [MatchTier::Exact, MatchTier::Prefix, MatchTier::Substring] {
            for (idx, (code, text)) in lowered.iter().enumerate() {
                if results.len() >= limit {
                    break 'tiers;
                }
                if !picked[idx] && tier.matches(&term, code, text) {
                    picked[idx] = true;
                    results.push(DictionaryMatch::from(&self.entries[idx]));
                }
            }
        }

        results.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.code.cmp(&b.code)));
        results
    }

    /// Uniform sample without replacement.
    pub fn random_entries<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<DictionaryMatch> {
        self.entries
            .choose_multiple(rng, count.min(self.entries.len()))
            .map(DictionaryMatch::from)
            .collect()
    }

    pub fn stats(&self) -> DictionaryStats {
        let mut stats = DictionaryStats {
            total_entries: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry.family() {
                Some(CodeFamily::Numeric) => stats.numeric_codes += 1,
                Some(CodeFamily::Alphanumeric) => stats.alphanumeric_codes += 1,
                Some(CodeFamily::FourDigit) => stats.four_digit_codes += 1,
                None => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy)]
enum MatchTier {
    Exact,
    Prefix,
    Substring,
}

impl MatchTier {
    fn matches(self, term: &str, code: &str, text: &str) -> bool {
        match self {
            Self::Exact => code == term || text == term,
            Self::Prefix => code.starts_with(term) || text.starts_with(term),
            Self::Substring => code.contains(term) || text.contains(term),
        }
    }
}
