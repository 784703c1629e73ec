//! Size heuristics shared by every layer.
//!
//! Lengths are counted in Unicode scalar values so a one-character glyph
//! weighs the same as one ASCII letter.

/// Default characters-per-token ratio.
pub const CHARS_PER_TOKEN: usize = 4;

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Rough token count: `ceil(chars / 4)`. Not a real tokenizer.
pub fn estimate_tokens(text: &str) -> usize {
    tokens_for_chars(char_len(text), CHARS_PER_TOKEN)
}

/// `ceil(chars / chars_per_token)`, treating a zero divisor as 1.
pub fn tokens_for_chars(chars: usize, chars_per_token: usize) -> usize {
    chars.div_ceil(chars_per_token.max(1))
}

/// `after / before * 100`, or 100 for an empty `before`.
pub fn retained_percent(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 100.0;
    }
    after as f64 / before as f64 * 100.0
}

/// Percentage reduction from `before` to `after`; 0 for an empty `before`.
pub fn reduction_percent(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    100.0 - retained_percent(before, after)
}
