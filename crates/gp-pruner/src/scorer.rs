//! Token scoring strategies.

use crate::lexicon::{is_negation, is_stopword};
use gp_core::PrunerConfig;

/// Where a word sits among the words still kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenContext {
    /// Index within its sentence.
    pub position: usize,
    pub sentence_len: usize,
    /// How many times the same lowercase word was already seen.
    pub occurrence: usize,
}

impl TokenContext {
    /// 0.0 in the middle of a sentence, 1.0 at either edge.
    pub fn edge_proximity(&self) -> f64 {
        if self.sentence_len <= 1 {
            return 1.0;
        }
        let p = self.position as f64 / (self.sentence_len - 1) as f64;
        (2.0 * p - 1.0).abs()
    }

    pub fn is_sentence_start(&self) -> bool {
        self.position == 0
    }
}

/// Higher score means more important. Scores only need to be comparable
/// with each other; they are not normalized. A score must depend only on
/// `token` and `ctx`: the pruner reuses it while the context is unchanged.
pub trait TokenScorer: Send + Sync {
    fn score(&self, token: &str, ctx: &TokenContext) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Default scorer: word class × sentence position × repetition discount.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    config: PrunerConfig,
}

impl HeuristicScorer {
    pub fn new(config: PrunerConfig) -> Self {
        Self { config }
    }

    fn base_score(&self, token: &str, ctx: &TokenContext) -> f64 {
        let lower = token.to_lowercase();
        if is_negation(&lower) {
            return self.config.negation_score;
        }
        if is_stopword(&lower) {
            return self.config.stopword_score;
        }

        let mut score = self.config.content_score;
        if token.chars().any(|c| c.is_numeric()) {
            score += 0.3;
        }
        // Capitals mid-sentence usually mark names and identifiers.
        if !ctx.is_sentence_start() && token.chars().next().is_some_and(char::is_uppercase) {
            score += 0.2;
        }
        score + token.chars().count().min(12) as f64 / 12.0 * 0.2
    }
}

impl TokenScorer for HeuristicScorer {
    fn score(&self, token: &str, ctx: &TokenContext) -> f64 {
        let position = 1.0 + self.config.boundary_weight * ctx.edge_proximity();
        let repetition = 1.0 / (1.0 + self.config.repetition_penalty * ctx.occurrence as f64);
        self.base_score(token, ctx) * position * repetition
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
