//! Iterative lowest-importance-first word removal.

use crate::scorer::{HeuristicScorer, TokenContext, TokenScorer};
use crate::tokenize::{tokenize, Unit, UnitKind};
use gp_core::{char_len, reduction_percent, PrunerConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneResult {
    pub compressed: String,
    /// Length reduction in percent.
    pub compression_ratio: f64,
    /// Heuristic 0–100, decreasing with the share of words removed.
    pub semantic_score_estimate: f64,
    pub original_tokens: usize,
    pub kept_tokens: usize,
    /// Removed words, in removal order.
    pub removed_tokens: Vec<String>,
    /// The removal floor stopped pruning before the target was met.
    pub floor_reached: bool,
}

impl PruneResult {
    fn unchanged(prompt: &str, words: usize) -> Self {
        Self {
            compressed: prompt.to_string(),
            compression_ratio: 0.0,
            semantic_score_estimate: 100.0,
            original_tokens: words,
            kept_tokens: words,
            removed_tokens: Vec::new(),
            floor_reached: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenScore {
    pub token: String,
    pub score: f64,
}

pub struct ImportancePruner {
    scorer: Box<dyn TokenScorer>,
    config: PrunerConfig,
}

impl ImportancePruner {
    pub fn new(config: PrunerConfig) -> Self {
        Self { scorer: Box::new(HeuristicScorer::new(config.clone())), config }
    }

    /// Replace the scoring strategy; the removal loop and its floor stay the same.
    pub fn with_scorer(mut self, scorer: Box<dyn TokenScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn config(&self) -> &PrunerConfig {
        &self.config
    }

    /// Remove low-importance words until at most `target_ratio` of them
    /// remain, never going below `floor_fraction * target_ratio` of them.
    pub fn compress(&self, prompt: &str, target_ratio: f64) -> PruneResult {
        let units = tokenize(prompt);
        let n = units.iter().filter(|u| u.is_word()).count();
        if n == 0 {
            return PruneResult::unchanged(prompt, 0);
        }

        let ratio = if target_ratio.is_nan() { 1.0 } else { target_ratio.clamp(0.0, 1.0) };
        let target = ratio * n as f64;
        let floor = self.config.floor_fraction * target;

        let mut kept = vec![true; units.len()];
        let mut kept_count = n;
        let mut removed_tokens = Vec::new();
        let mut state = ScoreState::new(&units);

        while kept_count as f64 > target && (kept_count - 1) as f64 >= floor && kept_count > 1 {
            self.rescore(&units, &mut state);
            // Lowest score goes first; on ties the later word goes.
            let Some((victim, score)) = state
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.kept)
                .map(|(i, slot)| (i, slot.score))
                .reduce(|best, cur| if cur.1 <= best.1 { cur } else { best })
            else {
                break;
            };
            let unit = state.remove(victim);
            tracing::trace!(token = units[unit].text, score, "pruned");
            kept[unit] = false;
            kept_count -= 1;
            removed_tokens.push(units[unit].text.to_string());
        }

        let floor_reached = kept_count as f64 > target;
        if floor_reached {
            tracing::debug!(kept = kept_count, target, floor, "pruning floor reached before target");
        }
        if removed_tokens.is_empty() {
            return PruneResult { floor_reached, ..PruneResult::unchanged(prompt, n) };
        }

        let compressed = render(&units, &kept);
        let removed_fraction = removed_tokens.len() as f64 / n as f64;
        PruneResult {
            compression_ratio: reduction_percent(char_len(prompt), char_len(&compressed)),
            semantic_score_estimate: semantic_estimate(removed_fraction, self.config.semantic_exponent),
            compressed,
            original_tokens: n,
            kept_tokens: kept_count,
            removed_tokens,
            floor_reached,
        }
    }

    /// Score every word of `prompt` as if nothing had been removed.
    pub fn analyze_prompt(&self, prompt: &str) -> Vec<TokenScore> {
        let units = tokenize(prompt);
        let mut state = ScoreState::new(&units);
        self.rescore(&units, &mut state);
        state
            .slots
            .iter()
            .map(|slot| TokenScore { token: units[slot.unit].text.to_string(), score: slot.score })
            .collect()
    }

    /// Refresh the context of every kept word in one pass. The scorer only
    /// runs for words whose context changed since the last pass.
    fn rescore(&self, units: &[Unit<'_>], state: &mut ScoreState) {
        state.position.fill(0);
        state.seen.fill(0);
        for slot in state.slots.iter_mut().filter(|slot| slot.kept) {
            let ctx = TokenContext {
                position: state.position[slot.sentence],
                sentence_len: state.sentence_len[slot.sentence],
                occurrence: state.seen[slot.key],
            };
            state.position[slot.sentence] += 1;
            state.seen[slot.key] += 1;
            if slot.ctx != Some(ctx) {
                slot.score = self.scorer.score(units[slot.unit].text, &ctx);
                slot.ctx = Some(ctx);
            }
        }
    }
}

/// One word of the prompt and its last computed score.
struct Slot {
    unit: usize,
    sentence: usize,
    /// Interned lowercase form, for occurrence counting.
    key: usize,
    ctx: Option<TokenContext>,
    score: f64,
    kept: bool,
}

/// Bookkeeping kept across removal steps so a step is a single linear pass.
struct ScoreState {
    slots: Vec<Slot>,
    sentence_len: Vec<usize>,
    position: Vec<usize>,
    seen: Vec<usize>,
}

impl ScoreState {
    fn new(units: &[Unit<'_>]) -> Self {
        let sentences = units.last().map_or(0, |u| u.sentence + 1);
        let mut sentence_len = vec![0usize; sentences];
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut slots = Vec::new();

        for (i, u) in units.iter().enumerate() {
            if u.kind != UnitKind::Word {
                continue;
            }
            let next = keys.len();
            let key = *keys.entry(u.text.to_lowercase()).or_insert(next);
            sentence_len[u.sentence] += 1;
            slots.push(Slot { unit: i, sentence: u.sentence, key, ctx: None, score: 0.0, kept: true });
        }

        Self { slots, sentence_len, position: vec![0; sentences], seen: vec![0; keys.len()] }
    }

    /// Drop a slot and return its unit index.
    fn remove(&mut self, slot: usize) -> usize {
        let slot = &mut self.slots[slot];
        slot.kept = false;
        self.sentence_len[slot.sentence] -= 1;
        slot.unit
    }
}

impl Default for ImportancePruner {
    fn default() -> Self {
        Self::new(PrunerConfig::default())
    }
}

impl std::fmt::Debug for ImportancePruner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportancePruner")
            .field("scorer", &self.scorer.name())
            .field("config", &self.config)
            .finish()
    }
}

/// `100 * (1 - removed_fraction) ^ exponent`, clamped to `[0, 100]`.
pub fn semantic_estimate(removed_fraction: f64, exponent: f64) -> f64 {
    let retained = (1.0 - removed_fraction).clamp(0.0, 1.0);
    (100.0 * retained.powf(exponent)).clamp(0.0, 100.0)
}

fn opener_for(close: &str) -> Option<char> {
    match close {
        ")" => Some('('),
        "]" => Some('['),
        "}" => Some('{'),
        _ => None,
    }
}

/// Rebuild text from the kept units. Original spacing is kept between
/// surviving neighbours and a removed gap becomes one space. Separators and
/// terminators are not left dangling at the start or doubled, and brackets
/// whose contents were all pruned are dropped.
fn render(units: &[Unit<'_>], kept: &[bool]) -> String {
    let mut out = String::new();
    let mut gap = false;

    for (i, u) in units.iter().enumerate() {
        if !kept[i] {
            gap = true;
            continue;
        }
        if let Some(open) = opener_for(u.text) {
            // Everything inside the pair was pruned.
            if gap && out.ends_with(open) {
                out.pop();
                let trimmed_len = out.trim_end().len();
                out.truncate(trimmed_len);
                continue;
            }
        }
        if u.kind == UnitKind::Punct && (u.is_separator() || u.is_terminator()) {
            let trimmed_len = out.trim_end().len();
            out.truncate(trimmed_len);
            match out.chars().next_back() {
                None => continue,
                Some(',' | ';' | ':') if u.is_separator() => continue,
                Some(',' | ';' | ':') => {
                    // "x, <removed>." ends the sentence instead of trailing a comma
                    out.pop();
                }
                Some('.' | '!' | '?') if gap => continue,
                _ => {}
            }
        }

        let space = !out.is_empty()
            && match u.kind {
                UnitKind::Word => u.leading_space || (gap && !out.ends_with(['(', '[', '{'])),
                UnitKind::Punct => u.leading_space,
            };
        if space {
            out.push(' ');
        }
        out.push_str(u.text);
        gap = false;
    }
    out.trim().to_string()
}
