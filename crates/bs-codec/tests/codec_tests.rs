use bs_codec::usage::{DecodeEvent, EncodeEvent};
use bs_codec::{Codec, MemoryRecorder, UsageRecorder};
use bs_core::config::{DictionaryConfig, DictionarySourceKind};
use bs_core::{BotSpeakConfig, BsError, CodeFamily, DictionaryEntry, Result};
use bs_dictionary::{DictionarySource, StaticSource};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source whose entries can be replaced between fetches.
#[derive(Clone, Default)]
struct SwappableSource {
    entries: Arc<Mutex<Vec<DictionaryEntry>>>,
}

impl SwappableSource {
    fn with_pairs(pairs: &[(&str, &str)]) -> Self {
        let source = Self::default();
        source.set(pairs);
        source
    }

    fn set(&self, pairs: &[(&str, &str)]) {
        *self.entries.lock() = pairs.iter().map(|(c, t)| DictionaryEntry::new(*c, *t)).collect();
    }
}

impl DictionarySource for SwappableSource {
    fn name(&self) -> &str {
        "swappable"
    }

    fn get_dictionary(&self) -> Result<Vec<DictionaryEntry>> {
        Ok(self.entries.lock().clone())
    }
}

struct FailingRecorder;

impl UsageRecorder for FailingRecorder {
    fn record_encode(&self, _event: &EncodeEvent) -> anyhow::Result<()> {
        anyhow::bail!("store offline")
    }

    fn record_decode(&self, _event: &DecodeEvent) -> anyhow::Result<()> {
        anyhow::bail!("store offline")
    }
}

fn builtin_codec() -> Codec {
    Codec::new(Box::new(StaticSource::builtin()), BotSpeakConfig::default()).unwrap()
}

// ========== Built-in dictionary ==========

#[test]
fn test_builtin_encode_examples() {
    let codec = builtin_codec();
    let cases = [
        ("Hello, how are you today?", "237 244 190"),
        ("I need help with my computer.", "B13 215 115 0004"),
        ("Thank you very much for your assistance.", "242 750 much 214 116 0777"),
        ("What do you think about artificial intelligence?", "A01 224 G01"),
        ("Good morning! See you later.", "246 | 249"),
    ];
    for (text, expected) in cases {
        assert_eq!(codec.encode(text).encoded_text, expected, "encoding {text:?}");
    }
}

#[test]
fn test_builtin_encode_statistics() {
    let result = builtin_codec().encode("Hello, how are you today?");
    assert_eq!(result.original_text, "Hello, how are you today?");
    assert_eq!(result.statistics.original_length, 25);
    assert_eq!(result.statistics.encoded_length, 11);
    assert_eq!(result.statistics.compression_ratio, 0.44);
    assert_eq!(result.statistics.percentage_saved, 56.0);
}

#[test]
fn test_builtin_round_trip_text() {
    let codec = builtin_codec();
    let encoded = codec.encode("Good morning! See you later.").encoded_text;
    let report = codec.decode(&encoded);
    assert_eq!(report.decoded_text, "Good morning. See you later.");
    assert!(report.success);
}

#[test]
fn test_builtin_decode_scenario() {
    let report = builtin_codec().decode("237 245");
    assert_eq!(report.decoded_text, "Hello I'm fine.");
    assert_eq!(report.recognition_rate, 100.0);
}

#[test]
fn test_builtin_repeated_texts_keep_last_code() {
    let codec = builtin_codec();
    let report = codec.decode("285 0004 407 441");
    assert_eq!(report.decoded_text, "Work computer excuse me back.");
    assert!(report.success);
    assert_eq!(report.recognition_rate, 100.0);
    assert_eq!(codec.encode("I work on my computer").encoded_text, "i 285 211 115 0004");
    assert!(!codec.lookup_code("410").valid);
}

#[test]
fn test_builtin_decode_plain_passes_words() {
    let codec = builtin_codec();
    assert_eq!(codec.decode_plain("242 750 much"), "Thank you very much.");
    let report = codec.decode("242 750 much");
    assert_eq!(report.unknown_codes, vec!["much".to_string()]);
}

#[test]
fn test_builtin_lookup_and_stats() {
    let codec = builtin_codec();
    let info = codec.lookup_code("c01");
    assert_eq!(info.code, "C01");
    assert_eq!(info.text.as_deref(), Some("in addition"));
    assert_eq!(info.code_type, Some(CodeFamily::Alphanumeric));

    let stats = codec.dictionary_stats();
    assert_eq!(stats.total_entries, 2175);
    assert_eq!(codec.info().entries, 2175);
}

#[test]
fn test_builtin_search_and_random() {
    let codec = builtin_codec();
    let results = codec.search("hello");
    assert!(results.iter().any(|m| m.code == "237"));
    assert!(results.iter().all(|m| m.text.to_lowercase().contains("hello")));
    assert!(results.len() <= 50);
    assert_eq!(codec.search_with_limit("the", 3).len(), 3);
    assert_eq!(codec.random_entries(10).len(), 10);
    assert_eq!(codec.random_entries(500).len(), 50);
}

#[test]
fn test_from_config_builtin() {
    let codec = Codec::from_config(BotSpeakConfig::default()).unwrap();
    assert_eq!(codec.info().source, "builtin");
    assert_eq!(codec.info().version, 1);
}

#[test]
fn test_from_config_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.json");
    std::fs::write(&path, r#"{"237":"hello","244":"how are you"}"#).unwrap();
    let config = BotSpeakConfig {
        dictionary: DictionaryConfig { source: DictionarySourceKind::JsonFile, path: Some(path) },
        ..Default::default()
    };
    let codec = Codec::from_config(config).unwrap();
    assert_eq!(codec.encode("Hello how are you").encoded_text, "237 244");
}

// ========== Construction failures ==========

#[test]
fn test_unavailable_dictionary() {
    let err = Codec::new(Box::new(StaticSource::new(Vec::new())), BotSpeakConfig::default()).unwrap_err();
    assert!(matches!(err, BsError::DictionaryUnavailable { .. }));

    let config = BotSpeakConfig {
        dictionary: DictionaryConfig {
            source: DictionarySourceKind::JsonFile,
            path: Some("/nonexistent/botspeak.json".into()),
        },
        ..Default::default()
    };
    assert!(matches!(Codec::from_config(config), Err(BsError::DictionaryUnavailable { .. })));
}

#[test]
fn test_duplicate_text_rejected() {
    let source = StaticSource::from_pairs([("241", "excuse me"), ("407", "excuse me")]);
    let err = Codec::new(Box::new(source), BotSpeakConfig::default()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = BotSpeakConfig::default();
    config.codec.max_phrase_words = 0;
    let err = Codec::new(Box::new(StaticSource::builtin()), config).unwrap_err();
    assert!(matches!(err, BsError::Config(_)));
}

// ========== Refresh ==========

#[test]
fn test_refresh_swaps_snapshot() {
    let source = SwappableSource::with_pairs(&[("237", "hello")]);
    let codec = Codec::new(Box::new(source.clone()), BotSpeakConfig::default()).unwrap();
    let before = codec.snapshot();
    assert_eq!(codec.encode("hello world").encoded_text, "237 world");

    source.set(&[("237", "hello"), ("277", "world")]);
    let info = codec.refresh().unwrap();
    assert_eq!(info.version, 2);
    assert_eq!(info.entries, 2);
    assert_eq!(codec.encode("hello world").encoded_text, "237 277");

    // A held snapshot keeps answering from the old dictionary.
    assert_eq!(before.encoder().encode_text("hello world"), "237 world");
    assert_eq!(before.version(), 1);
}

#[test]
fn test_refresh_rebuilds_phrase_index() {
    let source = SwappableSource::with_pairs(&[("237", "hello")]);
    let codec = Codec::new(Box::new(source.clone()), BotSpeakConfig::default()).unwrap();
    assert_eq!(codec.info().phrases, 0);

    source.set(&[("237", "hello"), ("242", "thank you")]);
    codec.refresh().unwrap();
    assert_eq!(codec.info().phrases, 1);
    assert_eq!(codec.encode("Thank you").encoded_text, "242");
}

#[test]
fn test_refresh_failure_keeps_current() {
    let source = SwappableSource::with_pairs(&[("237", "hello")]);
    let codec = Codec::new(Box::new(source.clone()), BotSpeakConfig::default()).unwrap();

    source.set(&[]);
    assert!(matches!(codec.refresh(), Err(BsError::DictionaryUnavailable { .. })));

    source.set(&[("237", "hello"), ("238", "hello")]);
    assert!(codec.refresh().unwrap_err().is_validation());

    assert_eq!(codec.info().version, 1);
    assert_eq!(codec.decode("237").decoded_text, "Hello.");
}

#[test]
fn test_concurrent_reads_during_refresh() {
    let source = SwappableSource::with_pairs(&[("237", "hello")]);
    let codec = Codec::new(Box::new(source.clone()), BotSpeakConfig::default()).unwrap();

    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let encoded = codec.encode("hello world").encoded_text;
                        assert!(encoded == "237 world" || encoded == "237 277", "torn read: {encoded}");
                    }
                })
            })
            .collect();

        for round in 0..20 {
            if round % 2 == 0 {
                source.set(&[("237", "hello"), ("277", "world")]);
            } else {
                source.set(&[("237", "hello")]);
            }
            codec.refresh().unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    });

    assert_eq!(codec.info().version, 21);
}

// ========== Usage recording ==========

#[test]
fn test_memory_recorder_counts() {
    let recorder = Arc::new(MemoryRecorder::new());
    let codec = builtin_codec().with_recorder(recorder.clone());

    codec.encode("Hello, how are you today?");
    codec.encode("Hello zebra");
    codec.decode("237 a01 ZZZ");

    let totals = recorder.totals();
    assert_eq!(totals.encode_operations, 2);
    assert_eq!(totals.decode_operations, 1);
    assert_eq!(recorder.frequency("237"), 3);
    assert_eq!(recorder.frequency("A01"), 1);
    assert_eq!(recorder.frequency("zebra"), 0);
    assert_eq!(recorder.popular_codes(1), vec![("237".to_string(), 3)]);
}

#[test]
fn test_tracking_disabled() {
    let recorder = Arc::new(MemoryRecorder::new());
    let mut config = BotSpeakConfig::default();
    config.codec.track_usage = false;
    let codec = Codec::new(Box::new(StaticSource::builtin()), config)
        .unwrap()
        .with_recorder(recorder.clone());

    codec.encode("Hello");
    codec.decode("237");
    assert_eq!(recorder.totals().encode_operations, 0);
    assert_eq!(recorder.totals().decode_operations, 0);
}

#[test]
fn test_failing_recorder_does_not_surface() {
    let codec = builtin_codec().with_recorder(Arc::new(FailingRecorder));
    assert_eq!(codec.encode("Hello").encoded_text, "237");
    assert!(codec.decode("237").success);
}

// ========== Batch ==========

#[test]
fn test_decode_batch_reports() {
    let codec = builtin_codec();
    let items = codec.decode_batch(&["237 245", "", "237 ZZZ"]);
    assert_eq!(items.len(), 3);
    assert!(items[1].report.success);
    assert_eq!(items[1].report.decoded_text, "");
    assert_eq!(items[2].report.recognition_rate, 50.0);
    let json = serde_json::to_value(&items[2]).unwrap();
    assert_eq!(json["index"], 2);
    assert_eq!(json["unknown_codes"][0], "ZZZ");
}
