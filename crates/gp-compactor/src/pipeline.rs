//! Compression pipeline: hybrid preprocessing, importance pruning, then
//! symbolic substitution.

use crate::preprocess::HybridPreprocessor;
use crate::request::CompressRequest;
use gp_core::types::tokens_for_chars;
use gp_core::{
    char_len, reduction_percent, retained_percent, AnalyticsRecord, AnalyticsSink, CompressorConfig, Result,
    SymbolUsage,
};
use gp_pruner::ImportancePruner;
use gp_symbols::{DecodeReport, SymbolCodec, SymbolDictionary, UsedSymbol};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Strategy name reported to analytics sinks.
pub const STRATEGY: &str = "pipeline";

/// One step of the compression journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStage {
    pub name: String,
    pub text: String,
    /// Length in characters.
    pub length: usize,
    /// `length / original length * 100`.
    pub cumulative_ratio_percent: f64,
    /// The layer made the text longer, so its input was kept instead.
    pub fallback: bool,
}

/// A value per layer, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBreakdown {
    pub hybrid: f64,
    pub pruner: f64,
    pub codec: f64,
}

impl LayerBreakdown {
    pub fn min(&self) -> f64 {
        self.hybrid.min(self.pruner).min(self.codec)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionResult {
    pub original: String,
    pub compressed: String,
    pub target_ratio: f64,
    pub stages: Vec<CompressionStage>,
    /// Length reduction of each layer relative to its own input, in percent.
    pub per_layer: LayerBreakdown,
    pub total_compression_ratio: f64,
    pub total_tokens_saved: usize,
    pub layer_semantic_scores: LayerBreakdown,
    /// Lowest of the layer estimates.
    pub overall_semantic_score: f64,
    pub pruner_floor_reached: bool,
    pub used_symbols: Vec<UsedSymbol>,
    /// Legend for the symbols present in `compressed`; empty when there are none.
    pub decoding_hint: String,
}

impl CompressionResult {
    /// `compressed / original` in characters; 1.0 for an empty prompt.
    pub fn ratio(&self) -> f64 {
        retained_percent(char_len(&self.original), char_len(&self.compressed)) / 100.0
    }
}

/// Keep `output` unless it is longer than `input`.
fn guard(layer: &str, input: &str, output: String) -> (String, bool) {
    if char_len(&output) > char_len(input) {
        tracing::warn!(layer, input_len = char_len(input), output_len = char_len(&output), "layer grew the text, keeping its input");
        (input.to_string(), true)
    } else {
        (output, false)
    }
}

/// Stateless between calls; one instance can serve concurrent callers.
#[derive(Debug)]
pub struct PromptPipeline {
    config: CompressorConfig,
    preprocessor: HybridPreprocessor,
    pruner: ImportancePruner,
    codec: SymbolCodec,
}

impl PromptPipeline {
    pub fn new(dictionary: Arc<SymbolDictionary>, config: CompressorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            preprocessor: HybridPreprocessor::new(config.preprocessor.clone())?,
            pruner: ImportancePruner::new(config.pruner.clone()),
            codec: SymbolCodec::new(dictionary)?,
            config,
        })
    }

    /// Built-in dictionary and default configuration.
    pub fn builtin() -> Result<Self> {
        Self::new(SymbolDictionary::shared(), CompressorConfig::default())
    }

    /// Swap the pruning layer, e.g. for one with a custom scorer.
    pub fn with_pruner(mut self, pruner: ImportancePruner) -> Self {
        self.pruner = pruner;
        self
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    pub fn codec(&self) -> &SymbolCodec {
        &self.codec
    }

    pub fn compress_default(&self, prompt: &str) -> CompressionResult {
        self.compress(prompt, self.config.pipeline.default_target_ratio)
    }

    /// Run every layer. The result is never longer than `prompt`.
    pub fn compress(&self, prompt: &str, target_ratio: f64) -> CompressionResult {
        let original_len = char_len(prompt);
        let mut stages = Vec::with_capacity(3);
        let stage = |name: &str, text: &str, fallback: bool| {
            let length = char_len(text);
            tracing::debug!(stage = name, length, fallback, "stage complete");
            CompressionStage {
                name: name.to_string(),
                text: text.to_string(),
                length,
                cumulative_ratio_percent: retained_percent(original_len, length),
                fallback,
            }
        };

        let normalized = self.preprocessor.normalize_with_report(prompt);
        let hybrid_score = normalized.semantic_score;
        let (stage1, hybrid_fallback) = guard("hybrid", prompt, normalized.text);
        stages.push(stage("hybrid", &stage1, hybrid_fallback));

        let pruned = self.pruner.compress(&stage1, target_ratio);
        if pruned.floor_reached {
            tracing::warn!(kept = pruned.kept_tokens, target_ratio, "pruning floor reached before target ratio");
        }
        let pruner_score = pruned.semantic_score_estimate;
        let (stage2, pruner_fallback) = guard("pruner", &stage1, pruned.compressed);
        stages.push(stage("pruner", &stage2, pruner_fallback));

        let encoded = self.codec.compress(&stage2);
        let (stage3, codec_fallback) = guard("codec", &stage2, encoded.symbolic_text);
        stages.push(stage("codec", &stage3, codec_fallback));

        let per_layer = LayerBreakdown {
            hybrid: reduction_percent(original_len, char_len(&stage1)),
            pruner: reduction_percent(char_len(&stage1), char_len(&stage2)),
            codec: reduction_percent(char_len(&stage2), char_len(&stage3)),
        };
        let layer_semantic_scores = LayerBreakdown {
            hybrid: if hybrid_fallback { 100.0 } else { hybrid_score },
            pruner: if pruner_fallback { 100.0 } else { pruner_score },
            codec: 100.0,
        };
        let saved_chars = original_len.saturating_sub(char_len(&stage3));

        CompressionResult {
            original: prompt.to_string(),
            target_ratio,
            per_layer,
            total_compression_ratio: reduction_percent(original_len, char_len(&stage3)),
            total_tokens_saved: tokens_for_chars(saved_chars, self.config.pipeline.chars_per_token),
            overall_semantic_score: layer_semantic_scores.min(),
            layer_semantic_scores,
            pruner_floor_reached: pruned.floor_reached,
            used_symbols: if codec_fallback { Vec::new() } else { encoded.used_symbols },
            decoding_hint: self.codec.decoding_hint(&stage3),
            compressed: stage3,
            stages,
        }
    }

    /// `compress`, then hand the run's analytics to `sink`.
    pub fn compress_with_sink(&self, prompt: &str, target_ratio: f64, sink: &dyn AnalyticsSink) -> CompressionResult {
        let started = Instant::now();
        let result = self.compress(prompt, target_ratio);
        let cpt = self.config.pipeline.chars_per_token;

        sink.record(&AnalyticsRecord::new(
            STRATEGY,
            tokens_for_chars(char_len(&result.original), cpt),
            tokens_for_chars(char_len(&result.compressed), cpt),
            result.total_compression_ratio,
            result.overall_semantic_score,
            started.elapsed(),
        ));
        if !result.used_symbols.is_empty() {
            let usage: Vec<SymbolUsage> = result
                .used_symbols
                .iter()
                .map(|u| SymbolUsage { symbol: u.symbol.clone(), concept: u.concept.clone(), count: u.count })
                .collect();
            sink.record_symbol_usage(&usage);
        }
        result
    }

    /// Validate a `{"prompt", "targetRatio"?}` body, then compress.
    pub fn compress_request(&self, body: &Value) -> Result<CompressionResult> {
        let request = CompressRequest::from_json(body)?;
        let ratio = request.target_ratio.unwrap_or(self.config.pipeline.default_target_ratio);
        Ok(self.compress(&request.prompt, ratio))
    }

    /// Like `compress_request`, reporting rejected requests as failed runs.
    pub fn compress_request_with_sink(&self, body: &Value, sink: &dyn AnalyticsSink) -> Result<CompressionResult> {
        let started = Instant::now();
        match CompressRequest::from_json(body) {
            Ok(request) => {
                let ratio = request.target_ratio.unwrap_or(self.config.pipeline.default_target_ratio);
                Ok(self.compress_with_sink(&request.prompt, ratio, sink))
            }
            Err(e) => {
                let prompt_chars = body.get("prompt").and_then(Value::as_str).map_or(0, char_len);
                let tokens = tokens_for_chars(prompt_chars, self.config.pipeline.chars_per_token);
                tracing::warn!(error = %e, "compression request rejected");
                sink.record(&AnalyticsRecord::failed(STRATEGY, tokens, started.elapsed()));
                Err(e)
            }
        }
    }

    /// Expand symbols in a pipeline output.
    pub fn decode(&self, text: &str) -> DecodeReport {
        self.codec.decode_report(text)
    }
}
