//! Hybrid preprocessing: invisible characters, conversational filler and
//! spacing cleanup. Every pass is meaning-preserving up to the fillers.

use gp_core::{PreprocessorConfig, PromptError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Filler phrases removed wherever they appear, lowercase. None of them
/// overlaps a dictionary concept, so concept phrases survive normalization.
pub const BUILTIN_FILLERS: &[&str] = &[
    "please",
    "kindly",
    "could you please",
    "can you please",
    "would you please",
    "i was wondering if you could",
    "thank you in advance",
    "thanks in advance",
    "please note that",
    "it is important to note that",
    "as an ai language model",
    "basically",
    "actually",
];

/// Conversational openers. Mid-sentence they are usually content ("a thank
/// you note", "the history of course design"), so they are only removed at
/// the start of the text or of a sentence.
pub const OPENING_FILLERS: &[&str] = &[
    "could you",
    "can you",
    "would you",
    "i would like you to",
    "i want you to",
    "i need you to",
    "feel free to",
    "if you don't mind",
    "if possible",
    "thank you",
    "thanks",
    "note that",
    "certainly",
    "of course",
    "hey there",
    "hello there",
];

static RE_INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}\u{00AD}]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_SPACE_BEFORE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ([,.;:!?)\]}])").unwrap());
static RE_SPACE_AFTER_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([(\[{]) ").unwrap());
static RE_REPEATED_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",{2,}|;{2,}|!{2,}|\?{2,}").unwrap());
static RE_LEADING_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s,;:]+").unwrap());
static RE_TRAILING_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,;]+$").unwrap());
static RE_BUILTIN_FILLERS: LazyLock<Regex> =
    LazyLock::new(|| filler_matcher(BUILTIN_FILLERS.iter().copied()).unwrap());
static RE_OPENING_FILLERS: LazyLock<Regex> =
    LazyLock::new(|| opening_matcher(OPENING_FILLERS.iter().copied()).unwrap());

/// `(?:a|b|c)` over the phrases, longest first, inner spaces matching any
/// whitespace run.
fn alternation<'a>(phrases: impl Iterator<Item = &'a str>) -> String {
    let mut phrases: Vec<String> = phrases
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    phrases.sort();
    phrases.dedup();
    phrases.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let alternatives: Vec<String> = phrases
        .iter()
        .map(|p| p.split(' ').map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Word-bounded and case-insensitive, anywhere in the text. A directly
/// following `,` or `!` goes with the match.
fn filler_matcher<'a>(phrases: impl Iterator<Item = &'a str>) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b[,!]?", alternation(phrases)))
}

/// Like [`filler_matcher`], but only at the start of the text or right after
/// a sentence terminator, which is captured in group 1 and put back. The
/// opener may take its own `,` `!` or `.` with it.
fn opening_matcher<'a>(phrases: impl Iterator<Item = &'a str>) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(^\s*|[.!?]\s+){}\b[,!.]?", alternation(phrases)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    pub text: String,
    pub fillers_removed: usize,
    /// `100 - filler_penalty * fillers_removed`, floored at the configured minimum.
    pub semantic_score: f64,
}

#[derive(Debug, Clone)]
pub struct HybridPreprocessor {
    config: PreprocessorConfig,
    fillers: Option<Regex>,
    openers: Option<Regex>,
}

impl HybridPreprocessor {
    pub fn new(config: PreprocessorConfig) -> Result<Self> {
        if !config.strip_fillers {
            return Ok(Self { config, fillers: None, openers: None });
        }
        let fillers = if config.extra_fillers.is_empty() {
            Some(RE_BUILTIN_FILLERS.clone())
        } else {
            let all = BUILTIN_FILLERS
                .iter()
                .copied()
                .chain(config.extra_fillers.iter().map(String::as_str));
            let matcher = filler_matcher(all)
                .map_err(|e| PromptError::InvalidConfig(format!("preprocessor.extraFillers: {e}")))?;
            Some(matcher)
        };
        Ok(Self { config, fillers, openers: Some(RE_OPENING_FILLERS.clone()) })
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    pub fn normalize(&self, text: &str) -> String {
        self.normalize_with_report(text).text
    }

    /// Apply the cleanup passes until the text stops changing.
    pub fn normalize_with_report(&self, text: &str) -> Normalized {
        let mut current = text.to_string();
        let mut fillers_removed = 0;
        loop {
            let (next, removed) = self.pass(&current);
            fillers_removed += removed;
            if next == current {
                break;
            }
            current = next;
        }

        let semantic_score = (100.0 - self.config.filler_penalty * fillers_removed as f64)
            .max(self.config.min_semantic_score)
            .clamp(0.0, 100.0);
        Normalized { text: current, fillers_removed, semantic_score }
    }

    fn pass(&self, text: &str) -> (String, usize) {
        let mut out = RE_INVISIBLE.replace_all(text, "").into_owned();

        let mut removed = 0;
        let (stripped, count) = self.strip_fillers(&out);
        // A prompt made only of fillers is kept rather than emptied.
        if count > 0 && stripped.chars().any(char::is_alphanumeric) {
            out = stripped;
            removed = count;
        }

        out = RE_WHITESPACE.replace_all(&out, " ").into_owned();
        out = RE_SPACE_BEFORE_CLOSE.replace_all(&out, "$1").into_owned();
        out = RE_SPACE_AFTER_OPEN.replace_all(&out, "$1").into_owned();
        out = RE_REPEATED_PUNCT
            .replace_all(&out, |caps: &Captures| caps[0][..1].to_string())
            .into_owned();
        out = RE_LEADING_SEPARATORS.replace(&out, "").into_owned();
        out = RE_TRAILING_SEPARATORS.replace(&out, "").into_owned();
        (out.trim().to_string(), removed)
    }

    fn strip_fillers(&self, text: &str) -> (String, usize) {
        let mut out = text.to_string();
        let mut count = 0;
        if let Some(fillers) = &self.fillers {
            let n = fillers.find_iter(&out).count();
            if n > 0 {
                count += n;
                out = fillers.replace_all(&out, " ").into_owned();
            }
        }
        if let Some(openers) = &self.openers {
            let n = openers.find_iter(&out).count();
            if n > 0 {
                count += n;
                out = openers.replace_all(&out, "$1").into_owned();
            }
        }
        (out, count)
    }
}

impl Default for HybridPreprocessor {
    fn default() -> Self {
        Self {
            config: PreprocessorConfig::default(),
            fillers: Some(RE_BUILTIN_FILLERS.clone()),
            openers: Some(RE_OPENING_FILLERS.clone()),
        }
    }
}
