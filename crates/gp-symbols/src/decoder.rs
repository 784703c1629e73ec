//! Symbol → concept expansion, plus the analyzers built on symbol scanning.
//!
//! Decoding fails open: anything that is not a dictionary symbol is copied
//! through untouched.

use crate::codec::SymbolCodec;
use crate::dictionary::{Category, SymbolEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDetail {
    pub symbol: String,
    pub concept: String,
    /// Character offset of the symbol in the scanned text.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeAnalysis {
    pub total_symbols: usize,
    pub categories: BTreeMap<Category, usize>,
    /// Share of characters that belong to recognized symbols, 0–100.
    pub coverage_percent: f64,
    /// Symbol-looking characters that are not in the dictionary.
    pub unrecognized: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeReport {
    pub decoded: String,
    pub symbols_found: Vec<SymbolDetail>,
    pub analysis: DecodeAnalysis,
    pub decoding_hint: String,
}

/// Typographic punctuation that is common in prose and not worth flagging.
const PROSE_PUNCT: &[char] = &['‘', '’', '“', '”', '–', '—', '\u{00A0}'];

fn looks_like_symbol(c: char) -> bool {
    !c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace() && !PROSE_PUNCT.contains(&c)
}

/// One recognized symbol occurrence, in byte offsets.
struct Hit<'d> {
    start: usize,
    end: usize,
    entry: &'d SymbolEntry,
}

impl SymbolCodec {
    fn scan<'a>(&'a self, text: &str) -> Vec<Hit<'a>> {
        let Some(matcher) = &self.symbol_matcher else {
            return Vec::new();
        };
        matcher
            .find_iter(text)
            .filter_map(|m| {
                self.dictionary
                    .lookup_by_symbol(m.as_str())
                    .map(|entry| Hit { start: m.start(), end: m.end(), entry })
            })
            .collect()
    }

    /// Expand every known symbol into its concept phrase. A space is put
    /// between an expansion and a neighbouring letter or digit so words
    /// never fuse.
    pub fn decode(&self, text: &str) -> String {
        let hits = self.scan(text);
        if hits.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() * 2);
        let mut last = 0;
        for hit in &hits {
            out.push_str(&text[last..hit.start]);
            if out.chars().next_back().is_some_and(char::is_alphanumeric) {
                out.push(' ');
            }
            out.push_str(&hit.entry.concept);
            if text[hit.end..].chars().next().is_some_and(char::is_alphanumeric) {
                out.push(' ');
            }
            last = hit.end;
        }
        out.push_str(&text[last..]);
        out
    }

    /// Every recognized symbol occurrence with its character offset.
    pub fn symbol_details(&self, text: &str) -> Vec<SymbolDetail> {
        let mut details = Vec::new();
        let mut chars_before = 0;
        let mut last = 0;
        for hit in self.scan(text) {
            chars_before += text[last..hit.start].chars().count();
            details.push(SymbolDetail {
                symbol: hit.entry.symbol.clone(),
                concept: hit.entry.concept.clone(),
                position: chars_before,
            });
            chars_before += hit.entry.symbol.chars().count();
            last = hit.end;
        }
        details
    }

    pub fn analyze_symbols(&self, text: &str) -> DecodeAnalysis {
        let total_chars = text.chars().count();
        let mut categories = BTreeMap::new();
        let mut symbol_chars = 0;
        let mut unrecognized = 0;
        let mut last = 0;
        let hits = self.scan(text);

        for hit in &hits {
            unrecognized += text[last..hit.start].chars().filter(|&c| looks_like_symbol(c)).count();
            symbol_chars += hit.entry.symbol.chars().count();
            *categories.entry(hit.entry.category).or_insert(0) += 1;
            last = hit.end;
        }
        unrecognized += text[last..].chars().filter(|&c| looks_like_symbol(c)).count();

        let coverage_percent = if total_chars == 0 {
            0.0
        } else {
            symbol_chars as f64 / total_chars as f64 * 100.0
        };

        DecodeAnalysis { total_symbols: hits.len(), categories, coverage_percent, unrecognized }
    }

    /// Legend for just the symbols present in `text`, in order of first
    /// appearance, e.g. `[Legend: ∴=therefore; →=leads to]`. Empty when no
    /// symbol is present.
    pub fn decoding_hint(&self, text: &str) -> String {
        let mut seen: Vec<&SymbolEntry> = Vec::new();
        for hit in self.scan(text) {
            if !seen.iter().any(|e| e.symbol == hit.entry.symbol) {
                seen.push(hit.entry);
            }
        }
        if seen.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = seen.iter().map(|e| format!("{}={}", e.symbol, e.concept)).collect();
        format!("[Legend: {}]", pairs.join("; "))
    }

    /// Decode plus everything a caller needs to inspect the symbolic text.
    pub fn decode_report(&self, text: &str) -> DecodeReport {
        DecodeReport {
            decoded: self.decode(text),
            symbols_found: self.symbol_details(text),
            analysis: self.analyze_symbols(text),
            decoding_hint: self.decoding_hint(text),
        }
    }
}

