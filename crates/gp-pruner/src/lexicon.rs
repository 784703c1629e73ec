//! Word lists driving the heuristic scorer.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Function words that rarely carry task meaning on their own.
/// Negations live in [`NEGATIONS`].
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "is", "are", "was", "were", "be", "been",
    "being", "am", "do", "does", "did", "have", "has", "had", "having", "i", "me", "my", "we", "us",
    "our", "you", "your", "he", "him", "his", "she", "her", "it", "its", "they", "them", "their",
    "what", "which", "who", "whom", "whose", "and", "or", "but", "if", "then", "so", "as", "of",
    "at", "by", "for", "with", "about", "into", "through", "to", "from", "in", "on", "up", "out",
    "over", "under", "again", "further", "there", "here", "all", "any", "both", "each", "some",
    "such", "own", "same", "than", "too", "very", "can", "will", "would", "should", "could",
    "may", "might", "must", "shall", "just", "also", "really", "quite", "rather",
    "like", "well", "get", "got", "make", "let", "able", "want", "need", "please", "kindly",
    "basically", "actually", "simply", "literally", "maybe", "perhaps", "thing", "things",
];

/// Words whose removal inverts meaning.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nor", "nothing", "neither", "without", "cannot", "can't",
    "don't", "doesn't", "didn't", "won't", "wouldn't", "shouldn't", "isn't", "aren't", "wasn't",
    "weren't", "mustn't", "except", "avoid",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| STOPWORDS.iter().copied().collect());
static NEGATION_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| NEGATIONS.iter().copied().collect());

/// Expects a lowercase word.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Expects a lowercase word. Curly apostrophes are folded to `'`.
pub fn is_negation(word: &str) -> bool {
    if word.contains('’') {
        return NEGATION_SET.contains(word.replace('’', "'").as_str());
    }
    NEGATION_SET.contains(word)
}
