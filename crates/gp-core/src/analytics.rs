//! Analytics boundary: the record the orchestrator hands to an external
//! collector once per invocation. Storage is the collector's business.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub strategy: String,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
    pub compression_ratio: f64,
    pub tokens_saved: usize,
    pub processing_time_ms: f64,
    pub semantic_score: f64,
    pub success: bool,
}

impl AnalyticsRecord {
    pub fn new(
        strategy: impl Into<String>,
        original_tokens: usize,
        compressed_tokens: usize,
        compression_ratio: f64,
        semantic_score: f64,
        elapsed: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            strategy: strategy.into(),
            original_tokens,
            compressed_tokens,
            compression_ratio,
            tokens_saved: original_tokens.saturating_sub(compressed_tokens),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
            semantic_score,
            success: true,
        }
    }

    pub fn failed(strategy: impl Into<String>, original_tokens: usize, elapsed: Duration) -> Self {
        Self {
            compressed_tokens: original_tokens,
            success: false,
            ..Self::new(strategy, original_tokens, original_tokens, 0.0, 0.0, elapsed)
        }
    }
}

/// How often one symbol was substituted during a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolUsage {
    pub symbol: String,
    pub concept: String,
    pub count: usize,
}

/// Receiver for per-invocation analytics. Implementations must not block
/// for long: they run inline at the end of every pipeline call.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, record: &AnalyticsRecord);
    fn record_symbol_usage(&self, usage: &[SymbolUsage]);
}

/// Keeps everything in memory. Handy for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<AnalyticsRecord>>,
    usage: Mutex<Vec<SymbolUsage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AnalyticsRecord> {
        self.records.lock().clone()
    }

    /// Usage counts summed per symbol, in first-seen order.
    pub fn symbol_totals(&self) -> Vec<SymbolUsage> {
        let usage = self.usage.lock();
        let mut totals: Vec<SymbolUsage> = Vec::new();
        for u in usage.iter() {
            match totals.iter_mut().find(|t| t.symbol == u.symbol) {
                Some(t) => t.count += u.count,
                None => totals.push(u.clone()),
            }
        }
        totals
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&self, record: &AnalyticsRecord) {
        self.records.lock().push(record.clone());
    }

    fn record_symbol_usage(&self, usage: &[SymbolUsage]) {
        self.usage.lock().extend_from_slice(usage);
    }
}

/// Emits each record as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&self, record: &AnalyticsRecord) {
        tracing::info!(
            id = %record.id,
            strategy = %record.strategy,
            original_tokens = record.original_tokens,
            compressed_tokens = record.compressed_tokens,
            ratio = record.compression_ratio,
            semantic = record.semantic_score,
            elapsed_ms = record.processing_time_ms,
            success = record.success,
            "prompt compressed"
        );
    }

    fn record_symbol_usage(&self, usage: &[SymbolUsage]) {
        for u in usage {
            tracing::debug!(symbol = %u.symbol, concept = %u.concept, count = u.count, "symbol used");
        }
    }
}
