//! Symbolic codec: a fixed dictionary of compact glyphs standing for common
//! concept phrases, with an encoder, a fail-open decoder, and analyzers.

pub mod catalog;
pub mod codec;
pub mod decoder;
pub mod dictionary;
pub mod error;

pub use codec::{Encoded, SymbolCodec, UsedSymbol};
pub use decoder::{DecodeAnalysis, DecodeReport, SymbolDetail};
pub use dictionary::{Category, SymbolDictionary, SymbolEntry};
pub use error::{Result, SymbolError};

#[cfg(test)]
mod tests;
