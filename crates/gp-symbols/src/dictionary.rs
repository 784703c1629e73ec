//! Immutable symbol ↔ concept catalog.

use crate::catalog;
use crate::error::{Result, SymbolError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Concept family of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Logic,
    Relation,
    Comparison,
    Quantity,
    Time,
    Action,
    Status,
    Structure,
    Technical,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Logic,
        Category::Relation,
        Category::Comparison,
        Category::Quantity,
        Category::Time,
        Category::Action,
        Category::Status,
        Category::Structure,
        Category::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logic => "logic",
            Self::Relation => "relation",
            Self::Comparison => "comparison",
            Self::Quantity => "quantity",
            Self::Time => "time",
            Self::Action => "action",
            Self::Status => "status",
            Self::Structure => "structure",
            Self::Technical => "technical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub concept: String,
    pub category: Category,
    pub description: String,
}

impl SymbolEntry {
    pub fn new(symbol: &str, concept: &str, category: Category, description: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            concept: concept.to_string(),
            category,
            description: description.to_string(),
        }
    }
}

/// Letters, ASCII digits and `_` would let a symbol match inside ordinary words.
fn is_word_like(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}

/// Word boundaries can only sit next to a word character.
fn is_word_edge(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase and collapse whitespace so concept lookups ignore formatting.
pub(crate) fn concept_key(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

static SHARED: LazyLock<Arc<SymbolDictionary>> = LazyLock::new(|| match SymbolDictionary::builtin() {
    Ok(dict) => Arc::new(dict),
    Err(e) => panic!("built-in symbol dictionary is corrupt: {e}"),
});

/// Read-only after construction, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct SymbolDictionary {
    entries: Vec<SymbolEntry>,
    by_symbol: HashMap<String, usize>,
    by_concept: HashMap<String, usize>,
}

impl SymbolDictionary {
    /// Build from an explicit entry list, rejecting empty fields, duplicates,
    /// word-like symbols and concepts that cannot sit between word boundaries.
    pub fn from_entries(entries: Vec<SymbolEntry>) -> Result<Self> {
        let mut by_symbol = HashMap::with_capacity(entries.len());
        let mut by_concept = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.symbol.is_empty() {
                return Err(SymbolError::EmptyField { field: "symbol", index });
            }
            if entry.symbol.chars().any(is_word_like) {
                return Err(SymbolError::MalformedEntry {
                    index,
                    reason: format!("symbol {:?} contains a letter, digit or underscore", entry.symbol),
                });
            }
            let key = concept_key(&entry.concept);
            if key.is_empty() {
                return Err(SymbolError::EmptyField { field: "concept", index });
            }
            let edges = [key.chars().next(), key.chars().next_back()];
            if !edges.into_iter().flatten().all(is_word_edge) {
                return Err(SymbolError::MalformedEntry {
                    index,
                    reason: format!("concept {:?} must start and end with a letter or digit", entry.concept),
                });
            }
            if by_symbol.insert(entry.symbol.clone(), index).is_some() {
                return Err(SymbolError::DuplicateSymbol(entry.symbol.clone()));
            }
            if by_concept.insert(key, index).is_some() {
                return Err(SymbolError::DuplicateConcept(entry.concept.clone()));
            }
        }

        tracing::debug!(entries = entries.len(), "symbol dictionary built");
        Ok(Self { entries, by_symbol, by_concept })
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(catalog::builtin_entries())
    }

    /// Process-wide built-in dictionary. Panics on first use if the
    /// built-in catalog violates the dictionary invariants.
    pub fn shared() -> Arc<SymbolDictionary> {
        Arc::clone(&SHARED)
    }

    pub fn lookup_by_symbol(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.by_symbol.get(symbol).map(|&i| &self.entries[i])
    }

    /// Case-insensitive; whitespace runs inside `phrase` count as one space.
    pub fn lookup_by_concept(&self, phrase: &str) -> Option<&SymbolEntry> {
        self.by_concept.get(&concept_key(phrase)).map(|&i| &self.entries[i])
    }

    /// Entries of one category, in catalog order.
    pub fn entries_by_category(&self, category: Category) -> Vec<&SymbolEntry> {
        self.entries.iter().filter(|e| e.category == category).collect()
    }

    pub fn all_entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by concept length (in characters), longest first.
    /// Ties keep catalog order.
    pub fn concepts_by_length(&self) -> Vec<&SymbolEntry> {
        let mut sorted: Vec<&SymbolEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.concept.chars().count().cmp(&a.concept.chars().count()));
        sorted
    }

    /// Entries ordered by symbol length (in characters), longest first.
    pub fn symbols_by_length(&self) -> Vec<&SymbolEntry> {
        let mut sorted: Vec<&SymbolEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.symbol.chars().count().cmp(&a.symbol.chars().count()));
        sorted
    }

    /// Set of every character that appears in some symbol.
    pub fn symbol_chars(&self) -> HashSet<char> {
        self.entries.iter().flat_map(|e| e.symbol.chars()).collect()
    }
}
