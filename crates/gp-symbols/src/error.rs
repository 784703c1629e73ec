use gp_core::PromptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("Duplicate symbol in dictionary: {0}")]
    DuplicateSymbol(String),
    #[error("Duplicate concept in dictionary: {0}")]
    DuplicateConcept(String),
    #[error("Empty {field} in dictionary entry #{index}")]
    EmptyField { field: &'static str, index: usize },
    #[error("Malformed dictionary entry #{index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<SymbolError> for PromptError {
    fn from(err: SymbolError) -> Self {
        PromptError::Dictionary(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SymbolError>;
