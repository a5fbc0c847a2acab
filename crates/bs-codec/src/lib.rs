//! BotSpeak: reversible dictionary-driven text compression.
//!
//! Encode path: raw text → sentence split → normalization → greedy
//! longest-match tokenization against the phrase index and single-word
//! reverse lookup → code string. Decode path: code string → per-sentence
//! split → code canonicalization → dictionary lookup → text.
//!
//! Both directions run against an immutable [`Snapshot`]; [`Codec::refresh`]
//! replaces it wholesale.

pub mod code;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod normalizer;
pub mod phrase_index;
pub mod splitter;
pub mod stats;
pub mod usage;

pub use code::normalize_code;
pub use codec::{Codec, EncodeResult, Snapshot, SnapshotInfo};
pub use decoder::{BatchDecodeItem, CodeInfo, DecodeReport, Decoder};
pub use encoder::{Encoder, Token, TokenKind, SENTENCE_SEPARATOR};
pub use normalizer::normalize;
pub use phrase_index::PhraseIndex;
pub use splitter::split_sentences;
pub use stats::{compression_stats, CompressionStats};
pub use usage::{MemoryRecorder, UsageRecorder};
