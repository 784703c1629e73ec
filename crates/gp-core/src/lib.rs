//! Shared foundations for the glyphpress prompt compressor: errors,
//! configuration, size heuristics and the analytics boundary contract.

pub mod analytics;
pub mod config;
pub mod error;
pub mod types;

pub use analytics::{AnalyticsRecord, AnalyticsSink, MemorySink, SymbolUsage, TracingSink};
pub use config::{CompressorConfig, PipelineConfig, PreprocessorConfig, PrunerConfig};
pub use error::{PromptError, Result};
pub use types::{char_len, estimate_tokens, reduction_percent, retained_percent};
