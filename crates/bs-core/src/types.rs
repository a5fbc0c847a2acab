use serde::{Deserialize, Serialize};

/// One code ↔ text mapping as supplied by a dictionary collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub code: String,
    pub text: String,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub frequency: u64,
}

impl DictionaryEntry {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            code: code.into(),
            word_count: text.split_whitespace().count(),
            text,
            frequency: 0,
        }
    }

    pub fn with_frequency(mut self, frequency: u64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn family(&self) -> Option<CodeFamily> {
        CodeFamily::of(&self.code)
    }

    /// True when the text spans more than one word.
    pub fn is_phrase(&self) -> bool {
        self.text.contains(' ')
    }
}

/// The three disjoint code families, distinguished by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodeFamily {
    /// `100`..`999`
    #[serde(rename = "numeric")]
    Numeric,
    /// `A01`..`Z99`
    #[serde(rename = "alphanumeric")]
    Alphanumeric,
    /// `0001`..`9999`
    #[serde(rename = "4-digit")]
    FourDigit,
}

impl CodeFamily {
    /// Classify a canonical code by shape.
    pub fn of(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        match bytes {
            [lead, _, _] if bytes.iter().all(u8::is_ascii_digit) => {
                (*lead != b'0').then_some(Self::Numeric)
            }
            [a, b, c] if a.is_ascii_uppercase() && b.is_ascii_digit() && c.is_ascii_digit() => {
                Some(Self::Alphanumeric)
            }
            [_, _, _, _] if bytes.iter().all(u8::is_ascii_digit) => {
                (code != "0000").then_some(Self::FourDigit)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::FourDigit => "4-digit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric (common words/phrases)",
            Self::Alphanumeric => "alphanumeric (moderately common)",
            Self::FourDigit => "4-digit (technical/specialized)",
        }
    }
}

impl std::fmt::Display for CodeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dictionary entry as returned by search and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryMatch {
    pub code: String,
    pub text: String,
    pub code_type: Option<CodeFamily>,
    pub frequency: u64,
}

impl From<&DictionaryEntry> for DictionaryMatch {
    fn from(entry: &DictionaryEntry) -> Self {
        Self {
            code: entry.code.clone(),
            text: entry.text.clone(),
            code_type: entry.family(),
            frequency: entry.frequency,
        }
    }
}

/// Entry counts per code family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
    pub total_entries: usize,
    pub numeric_codes: usize,
    pub alphanumeric_codes: usize,
    pub four_digit_codes: usize,
}
