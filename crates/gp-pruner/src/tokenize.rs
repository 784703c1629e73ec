//! Split prompts into word and punctuation units.

use regex::Regex;
use std::sync::LazyLock;

/// Decimal numbers, then words with internal apostrophes or hyphens, then
/// any other single non-space character.
static RE_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{N}_]+(?:['’\-][\p{L}\p{N}_]+)*|\S").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Word,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit<'a> {
    pub text: &'a str,
    pub kind: UnitKind,
    /// Whitespace preceded this unit in the source.
    pub leading_space: bool,
    /// Zero-based sentence index.
    pub sentence: usize,
}

impl Unit<'_> {
    pub fn is_word(&self) -> bool {
        self.kind == UnitKind::Word
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self.text, "." | "!" | "?")
    }

    pub fn is_separator(&self) -> bool {
        matches!(self.text, "," | ";" | ":")
    }
}

pub fn tokenize(text: &str) -> Vec<Unit<'_>> {
    let mut units = Vec::new();
    let mut sentence = 0;
    let mut prev_end = 0;

    for m in RE_UNIT.find_iter(text) {
        let s = m.as_str();
        let kind = if s.chars().any(|c| c.is_alphanumeric() || c == '_') {
            UnitKind::Word
        } else {
            UnitKind::Punct
        };
        let unit = Unit { text: s, kind, leading_space: m.start() > prev_end, sentence };
        if unit.is_terminator() {
            sentence += 1;
        }
        units.push(unit);
        prev_end = m.end();
    }
    units
}

/// Number of word units in `text`.
pub fn word_count(text: &str) -> usize {
    tokenize(text).iter().filter(|u| u.is_word()).count()
}
