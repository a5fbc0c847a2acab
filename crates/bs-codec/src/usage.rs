//! Usage recording hooks. Frequency counting lives with the collaborator;
//! the codec only reports what it did.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EncodeEvent {
    pub input: String,
    pub output: String,
    pub compression_ratio: f64,
    pub elapsed: Duration,
    /// Dictionary codes emitted, in order, pass-through words excluded.
    pub codes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DecodeEvent {
    pub input: String,
    pub output: String,
    pub recognition_rate: f64,
    pub elapsed: Duration,
    /// Canonical codes that resolved, in order.
    pub codes: Vec<String>,
}

/// Receives one event per tracked encode/decode call.
///
/// Failures are logged by the codec and never reach the caller.
pub trait UsageRecorder: Send + Sync {
    fn record_encode(&self, event: &EncodeEvent) -> anyhow::Result<()>;
    fn record_decode(&self, event: &DecodeEvent) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTotals {
    pub encode_operations: u64,
    pub decode_operations: u64,
}

/// In-process recorder that counts operations and per-code frequency.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    totals: Mutex<UsageTotals>,
    frequencies: Mutex<HashMap<String, u64>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> UsageTotals {
        *self.totals.lock()
    }

    pub fn frequency(&self, code: &str) -> u64 {
        self.frequencies.lock().get(code).copied().unwrap_or(0)
    }

    /// Most used codes, ties broken by code.
    pub fn popular_codes(&self, limit: usize) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .frequencies
            .lock()
            .iter()
            .map(|(code, n)| (code.clone(), *n))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(limit);
        counts
    }

    fn bump(&self, codes: &[String]) {
        let mut freq = self.frequencies.lock();
        for code in codes {
            *freq.entry(code.clone()).or_insert(0) += 1;
        }
    }
}

impl UsageRecorder for MemoryRecorder {
    fn record_encode(&self, event: &EncodeEvent) -> anyhow::Result<()> {
        self.totals.lock().encode_operations += 1;
        self.bump(&event.codes);
        Ok(())
    }

    fn record_decode(&self, event: &DecodeEvent) -> anyhow::Result<()> {
        self.totals.lock().decode_operations += 1;
        self.bump(&event.codes);
        Ok(())
    }
}
