//! Built-in symbol catalog.
//!
//! Every symbol is a single non-alphanumeric glyph so it can never be
//! mistaken for part of a word, and every concept is a lowercase phrase
//! strictly longer than its symbol.

use crate::dictionary::{Category, SymbolEntry};
use Category::*;

const BUILTIN: &[(&str, &str, Category, &str)] = &[
    // Logic
    ("∴", "therefore", Logic, "conclusion follows"),
    ("∵", "because", Logic, "reason or cause"),
    ("⇒", "implies", Logic, "logical implication"),
    ("⇔", "if and only if", Logic, "biconditional"),
    ("∧", "and", Logic, "conjunction"),
    ("∨", "or", Logic, "disjunction"),
    ("¬", "not", Logic, "negation"),
    ("∀", "for all", Logic, "universal quantifier"),
    ("∃", "there exists", Logic, "existential quantifier"),
    ("∄", "there is no", Logic, "negated existence"),
    ("⊕", "either", Logic, "exclusive choice"),
    // Relation
    ("→", "leads to", Relation, "causes or produces"),
    ("←", "results from", Relation, "is caused by"),
    ("∈", "belongs to", Relation, "membership"),
    ("∉", "does not belong to", Relation, "non-membership"),
    ("⊂", "is a subset of", Relation, "strict inclusion"),
    ("≡", "is equivalent to", Relation, "equivalence"),
    ("↔", "corresponds to", Relation, "mutual mapping"),
    ("∝", "is proportional to", Relation, "proportionality"),
    ("⊥", "is independent of", Relation, "orthogonality"),
    ("∋", "contains", Relation, "inclusion of a member"),
    // Comparison
    ("≈", "approximately", Comparison, "roughly equal"),
    ("≠", "is not equal to", Comparison, "inequality"),
    ("≤", "less than or equal to", Comparison, "upper bound"),
    ("≥", "greater than or equal to", Comparison, "lower bound"),
    ("≪", "much less than", Comparison, "far smaller"),
    ("≫", "much greater than", Comparison, "far larger"),
    ("⋖", "less than", Comparison, "smaller"),
    ("⋗", "greater than", Comparison, "larger"),
    ("≅", "similar to", Comparison, "resemblance"),
    ("±", "plus or minus", Comparison, "tolerance"),
    // Quantity
    ("∑", "the sum of", Quantity, "summation"),
    ("∏", "the product of", Quantity, "multiplication over a set"),
    ("∞", "infinity", Quantity, "unbounded"),
    ("½", "one half", Quantity, "fraction 1/2"),
    ("¼", "one quarter", Quantity, "fraction 1/4"),
    ("∆", "difference", Quantity, "change between values"),
    ("№", "number of", Quantity, "count"),
    ("⌀", "average", Quantity, "mean value"),
    ("‰", "per thousand", Quantity, "per mille"),
    // Time
    ("⏰", "deadline", Time, "due time"),
    ("⌛", "timeout", Time, "time limit"),
    ("⟳", "repeat", Time, "do again"),
    ("↺", "retry", Time, "attempt again after failure"),
    ("⏭", "next step", Time, "what follows"),
    ("⏮", "previous step", Time, "what preceded"),
    ("⏱", "duration", Time, "elapsed time"),
    // Action
    ("✎", "edit", Action, "modify content"),
    ("⚙", "configure", Action, "set up options"),
    ("↑", "increase", Action, "raise a value"),
    ("↓", "decrease", Action, "lower a value"),
    ("⊞", "add", Action, "insert something"),
    ("⊟", "remove", Action, "delete something"),
    ("⇄", "convert", Action, "transform between forms"),
    ("✓", "verify", Action, "check correctness"),
    // Status
    ("✅", "completed", Status, "finished successfully"),
    ("❌", "failed", Status, "did not succeed"),
    ("⚠", "warning", Status, "caution"),
    ("★", "important", Status, "high priority"),
    ("⁇", "unknown", Status, "not determined"),
    ("✗", "incorrect", Status, "wrong"),
    ("✔", "correct", Status, "right"),
    // Structure
    ("§", "section", Structure, "document section"),
    ("¶", "paragraph", Structure, "text paragraph"),
    ("…", "and so on", Structure, "continuation"),
    ("•", "item", Structure, "list item"),
    // Technical
    ("⨍", "function", Technical, "callable routine"),
    ("⌘", "command", Technical, "instruction to run"),
    ("⛁", "database", Technical, "persistent data store"),
    ("☁", "cloud", Technical, "remote infrastructure"),
    ("🌐", "web development", Technical, "building for the web"),
    ("⌨", "input", Technical, "data going in"),
    ("⎙", "output", Technical, "data coming out"),
    ("⚿", "security", Technical, "protection against threats"),
];

/// Fresh copies of the built-in entries, in catalog order.
pub fn builtin_entries() -> Vec<SymbolEntry> {
    BUILTIN
        .iter()
        .map(|(symbol, concept, category, description)| SymbolEntry::new(symbol, concept, *category, description))
        .collect()
}
