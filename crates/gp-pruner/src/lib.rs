//! Importance pruner: drops the least important words of a prompt until a
//! target size ratio is met, using explicit heuristics (no language model).
//!
//! Scoring sits behind [`TokenScorer`] so a different strategy can be
//! plugged in without touching the removal loop.

pub mod lexicon;
pub mod pruner;
pub mod scorer;
pub mod tokenize;

pub use pruner::{ImportancePruner, PruneResult, TokenScore};
pub use scorer::{HeuristicScorer, TokenContext, TokenScorer};
pub use tokenize::{tokenize, Unit, UnitKind};
