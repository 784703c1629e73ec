use crate::error::{PromptError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "glyphpress";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressorConfig {
    pub pipeline: PipelineConfig,
    pub preprocessor: PreprocessorConfig,
    pub pruner: PrunerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Ratio used when the caller does not pass one.
    pub default_target_ratio: f64,
    pub chars_per_token: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessorConfig {
    pub strip_fillers: bool,
    /// Appended to the built-in filler list.
    pub extra_fillers: Vec<String>,
    /// Semantic points deducted per removed filler phrase.
    pub filler_penalty: f64,
    pub min_semantic_score: f64,
}

/// Weights for the heuristic token scorer and the removal floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrunerConfig {
    /// Removal stops at `floor_fraction * target_ratio * tokens`.
    pub floor_fraction: f64,
    pub stopword_score: f64,
    pub content_score: f64,
    pub negation_score: f64,
    /// Extra weight for words at sentence edges.
    pub boundary_weight: f64,
    /// Discount applied per earlier occurrence of the same word.
    pub repetition_penalty: f64,
    pub semantic_exponent: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_target_ratio: 0.5,
            chars_per_token: crate::types::CHARS_PER_TOKEN,
        }
    }
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            strip_fillers: true,
            extra_fillers: Vec::new(),
            filler_penalty: 1.0,
            min_semantic_score: 95.0,
        }
    }
}

impl Default for PrunerConfig {
    fn default() -> Self {
        Self {
            floor_fraction: 0.5,
            stopword_score: 0.25,
            content_score: 1.0,
            negation_score: 1.6,
            boundary_weight: 0.4,
            repetition_penalty: 1.0,
            semantic_exponent: 0.5,
        }
    }
}

impl CompressorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// `<config_dir>/glyphpress/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the user config file when it exists, defaults otherwise.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading compressor config");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.pipeline.default_target_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(PromptError::InvalidConfig(format!(
                "pipeline.defaultTargetRatio must be in (0, 1], got {ratio}"
            )));
        }
        if self.pipeline.chars_per_token == 0 {
            return Err(PromptError::InvalidConfig("pipeline.charsPerToken must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.pruner.floor_fraction) {
            return Err(PromptError::InvalidConfig(format!(
                "pruner.floorFraction must be in [0, 1], got {}",
                self.pruner.floor_fraction
            )));
        }
        if self.pruner.semantic_exponent <= 0.0 {
            return Err(PromptError::InvalidConfig("pruner.semanticExponent must be positive".into()));
        }
        let weights = [
            ("stopwordScore", self.pruner.stopword_score),
            ("contentScore", self.pruner.content_score),
            ("negationScore", self.pruner.negation_score),
            ("boundaryWeight", self.pruner.boundary_weight),
            ("repetitionPenalty", self.pruner.repetition_penalty),
        ];
        if let Some((name, value)) = weights.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(PromptError::InvalidConfig(format!(
                "pruner.{name} must be a non-negative number, got {value}"
            )));
        }
        if !(0.0..=100.0).contains(&self.preprocessor.min_semantic_score) {
            return Err(PromptError::InvalidConfig(
                "preprocessor.minSemanticScore must be in [0, 100]".into(),
            ));
        }
        if self.preprocessor.extra_fillers.iter().any(|f| f.trim().is_empty()) {
            return Err(PromptError::InvalidConfig("preprocessor.extraFillers contains an empty phrase".into()));
        }
        Ok(())
    }
}
