//! Concept phrase → symbol substitution.

use crate::dictionary::SymbolDictionary;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One symbol used by an encoding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedSymbol {
    pub symbol: String,
    pub concept: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoded {
    pub symbolic_text: String,
    /// In order of first use.
    pub used_symbols: Vec<UsedSymbol>,
}

/// Encoder and decoder over one dictionary. Matchers are compiled once.
#[derive(Debug, Clone)]
pub struct SymbolCodec {
    pub(crate) dictionary: Arc<SymbolDictionary>,
    /// Every concept, longest first, word-bounded and case-insensitive.
    concept_matcher: Option<Regex>,
    /// Every symbol, longest first.
    pub(crate) symbol_matcher: Option<Regex>,
}

fn concept_pattern(concept: &str) -> String {
    concept
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

impl SymbolCodec {
    pub fn new(dictionary: Arc<SymbolDictionary>) -> Result<Self> {
        let concept_matcher = if dictionary.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = dictionary
                .concepts_by_length()
                .iter()
                .map(|e| concept_pattern(&e.concept))
                .collect();
            // Alternation is leftmost-first, so the longest phrase wins at a given start.
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))?)
        };

        let symbol_matcher = if dictionary.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = dictionary
                .symbols_by_length()
                .iter()
                .map(|e| regex::escape(&e.symbol))
                .collect();
            Some(Regex::new(&alternatives.join("|"))?)
        };

        Ok(Self { dictionary, concept_matcher, symbol_matcher })
    }

    /// Codec over the process-wide built-in dictionary.
    pub fn builtin() -> Result<Self> {
        Self::new(SymbolDictionary::shared())
    }

    pub fn dictionary(&self) -> &SymbolDictionary {
        &self.dictionary
    }

    /// Replace every concept phrase with its symbol. Text between matches,
    /// including spacing and punctuation, is copied unchanged.
    pub fn compress(&self, text: &str) -> Encoded {
        let Some(matcher) = &self.concept_matcher else {
            return Encoded { symbolic_text: text.to_string(), used_symbols: Vec::new() };
        };

        let mut out = String::with_capacity(text.len());
        let mut used: Vec<UsedSymbol> = Vec::new();
        let mut used_index: HashMap<String, usize> = HashMap::new();
        let mut last = 0;

        for m in matcher.find_iter(text) {
            let Some(entry) = self.dictionary.lookup_by_concept(m.as_str()) else {
                continue;
            };
            out.push_str(&text[last..m.start()]);
            out.push_str(&entry.symbol);
            last = m.end();

            match used_index.get(&entry.symbol) {
                Some(&i) => used[i].count += 1,
                None => {
                    used_index.insert(entry.symbol.clone(), used.len());
                    used.push(UsedSymbol {
                        symbol: entry.symbol.clone(),
                        concept: entry.concept.clone(),
                        count: 1,
                    });
                }
            }
        }
        out.push_str(&text[last..]);

        if !used.is_empty() {
            tracing::trace!(symbols = used.len(), "symbolic substitution applied");
        }
        Encoded { symbolic_text: out, used_symbols: used }
    }
}
