//! Codec facade over an atomically swappable dictionary snapshot.

use crate::code::normalize_code;
use crate::decoder::{BatchDecodeItem, CodeInfo, DecodeReport, Decoder};
use crate::encoder::{join_sentences, Encoder};
use crate::stats::{compression_stats, CompressionStats};
use crate::usage::{DecodeEvent, EncodeEvent, UsageRecorder};
use bs_core::{BotSpeakConfig, DictionaryMatch, DictionaryStats, Result};
use bs_dictionary::{load_store, source_from_config, DictionarySource, DictionaryStore};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// A dictionary store together with the encoder and decoder derived from it.
#[derive(Debug)]
pub struct Snapshot {
    version: u64,
    loaded_at: DateTime<Utc>,
    source: String,
    store: Arc<DictionaryStore>,
    encoder: Encoder,
    decoder: Decoder,
}

impl Snapshot {
    pub fn build(source: &dyn DictionarySource, max_phrase_words: usize, version: u64) -> Result<Self> {
        let store = Arc::new(load_store(source)?);
        Ok(Self::from_store(store, source.name(), max_phrase_words, version))
    }

    pub fn from_store(store: Arc<DictionaryStore>, source: &str, max_phrase_words: usize, version: u64) -> Self {
        Self {
            version,
            loaded_at: Utc::now(),
            source: source.to_string(),
            encoder: Encoder::new(store.clone(), max_phrase_words),
            decoder: Decoder::new(store.clone()),
            store,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            version: self.version,
            entries: self.store.len(),
            phrases: self.encoder.phrases().len(),
            loaded_at: self.loaded_at,
            source: self.source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub version: u64,
    pub entries: usize,
    pub phrases: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeResult {
    pub original_text: String,
    pub encoded_text: String,
    pub statistics: CompressionStats,
}

/// Thread-safe codec. Any number of calls may run concurrently; `refresh`
/// swaps in a fully built snapshot so readers see either the old or the new
/// dictionary, never a mix.
pub struct Codec {
    source: Box<dyn DictionarySource>,
    config: BotSpeakConfig,
    active: RwLock<Arc<Snapshot>>,
    refresh_lock: Mutex<()>,
    recorder: Option<Arc<dyn UsageRecorder>>,
}

impl Codec {
    pub fn new(source: Box<dyn DictionarySource>, config: BotSpeakConfig) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot::build(source.as_ref(), config.codec.max_phrase_words, 1)?;
        tracing::info!(
            source = source.name(),
            entries = snapshot.store().len(),
            phrases = snapshot.encoder().phrases().len(),
            "codec ready"
        );
        Ok(Self {
            source,
            config,
            active: RwLock::new(Arc::new(snapshot)),
            refresh_lock: Mutex::new(()),
            recorder: None,
        })
    }

    /// Build with the dictionary collaborator named in `config`.
    pub fn from_config(config: BotSpeakConfig) -> Result<Self> {
        let source = source_from_config(&config.dictionary)?;
        Self::new(source, config)
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn UsageRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn config(&self) -> &BotSpeakConfig {
        &self.config
    }

    /// The active snapshot. Hold it to make several calls against one
    /// consistent dictionary.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.active.read().clone()
    }

    pub fn info(&self) -> SnapshotInfo {
        self.snapshot().info()
    }

    /// Re-fetch the dictionary and swap it in. On failure the current
    /// snapshot stays active.
    pub fn refresh(&self) -> Result<SnapshotInfo> {
        let _guard = self.refresh_lock.lock();
        let version = self.snapshot().version() + 1;
        let snapshot = match Snapshot::build(self.source.as_ref(), self.config.codec.max_phrase_words, version) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(source = self.source.name(), error = %err, "dictionary refresh rejected");
                return Err(err);
            }
        };
        let info = snapshot.info();
        *self.active.write() = Arc::new(snapshot);
        tracing::info!(version, entries = info.entries, phrases = info.phrases, "dictionary snapshot swapped");
        Ok(info)
    }

    pub fn encode(&self, text: &str) -> EncodeResult {
        let snapshot = self.snapshot();
        let started = Instant::now();
        let sentences = snapshot.encoder().tokenize_text(text);
        let encoded_text = join_sentences(&sentences);
        let statistics = compression_stats(text, &encoded_text);
        let elapsed = started.elapsed();
        tracing::debug!(
            original = statistics.original_length,
            encoded = statistics.encoded_length,
            elapsed_us = elapsed.as_micros() as u64,
            "encoded text"
        );

        if let Some(recorder) = self.tracking() {
            let event = EncodeEvent {
                input: text.to_string(),
                output: encoded_text.clone(),
                compression_ratio: statistics.compression_ratio,
                elapsed,
                codes: sentences
                    .iter()
                    .flatten()
                    .filter(|t| t.is_code())
                    .map(|t| t.output.clone())
                    .collect(),
            };
            if let Err(err) = recorder.record_encode(&event) {
                tracing::warn!(error = %err, "could not record encode operation");
            }
        }

        EncodeResult {
            original_text: text.to_string(),
            encoded_text,
            statistics,
        }
    }

    /// Validating decode.
    pub fn decode(&self, encoded: &str) -> DecodeReport {
        let snapshot = self.snapshot();
        let started = Instant::now();
        let report = snapshot.decoder().decode_with_validation(encoded);
        let elapsed = started.elapsed();
        tracing::debug!(
            total = report.total_codes,
            recognized = report.recognized_codes,
            recognition_rate = report.recognition_rate,
            elapsed_us = elapsed.as_micros() as u64,
            "decoded codes"
        );

        if let Some(recorder) = self.tracking() {
            let event = DecodeEvent {
                input: encoded.to_string(),
                output: report.decoded_text.clone(),
                recognition_rate: report.recognition_rate,
                elapsed,
                codes: encoded
                    .split_whitespace()
                    .map(normalize_code)
                    .filter(|code| snapshot.store().contains_code(code))
                    .collect(),
            };
            if let Err(err) = recorder.record_decode(&event) {
                tracing::warn!(error = %err, "could not record decode operation");
            }
        }

        report
    }

    /// Lenient decode: unknown tokens are kept as plain words.
    pub fn decode_plain(&self, encoded: &str) -> String {
        self.snapshot().decoder().decode_codes(encoded)
    }

    pub fn decode_batch<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<BatchDecodeItem> {
        self.snapshot().decoder().decode_batch(inputs)
    }

    pub fn lookup_code(&self, code: &str) -> CodeInfo {
        self.snapshot().decoder().lookup_code(code)
    }

    /// Search with the configured default limit.
    pub fn search(&self, query: &str) -> Vec<DictionaryMatch> {
        self.search_with_limit(query, self.config.search.default_limit)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<DictionaryMatch> {
        self.snapshot().store().search(query, limit)
    }

    /// Random sample, capped at `search.max_random`.
    pub fn random_entries(&self, count: usize) -> Vec<DictionaryMatch> {
        let count = count.min(self.config.search.max_random);
        self.snapshot().store().random_entries(&mut rand::thread_rng(), count)
    }

    pub fn dictionary_stats(&self) -> DictionaryStats {
        self.snapshot().store().stats()
    }

    fn tracking(&self) -> Option<&Arc<dyn UsageRecorder>> {
        if self.config.codec.track_usage {
            self.recorder.as_ref()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("source", &self.source.name())
            .field("snapshot", &self.info())
            .field("tracking", &self.recorder.is_some())
            .finish()
    }
}
