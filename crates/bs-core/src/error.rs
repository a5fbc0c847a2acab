use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsError {
    #[error("Dictionary unavailable from {source_name}: {reason}")]
    DictionaryUnavailable { source_name: String, reason: String },
    #[error("Duplicate code in dictionary: {code}")]
    DuplicateCode { code: String },
    #[error("Duplicate text in dictionary: {text:?} mapped by {first} and {second}")]
    DuplicateText { text: String, first: String, second: String },
    #[error("Invalid dictionary entry {code:?}: {reason}")]
    InvalidEntry { code: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BsError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DictionaryUnavailable { source_name: source_name.into(), reason: reason.into() }
    }

    /// True for load-time uniqueness and shape violations.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCode { .. } | Self::DuplicateText { .. } | Self::InvalidEntry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BsError>;
