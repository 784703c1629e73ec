//! glyphpress compactor: runs a prompt through three layers and reports the
//! size and estimated meaning retained after each one.
//!
//! Layers:
//! 1. Hybrid preprocessing (invisible characters, filler phrases, spacing)
//! 2. Importance pruning of low-value words
//! 3. Symbolic substitution of known concept phrases
//!
//! A layer whose output is longer than its input is skipped, so the result
//! is never longer than the prompt.

pub mod pipeline;
pub mod preprocess;
pub mod request;

pub use pipeline::{CompressionResult, CompressionStage, LayerBreakdown, PromptPipeline};
pub use preprocess::{HybridPreprocessor, Normalized};
pub use request::CompressRequest;
