//! Request-layer contract: `{"prompt": string, "targetRatio"?: number}`.

use gp_core::{PromptError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ratio: Option<f64>,
}

impl CompressRequest {
    /// Validate a request body before any layer runs.
    pub fn from_json(body: &Value) -> Result<Self> {
        let Some(fields) = body.as_object() else {
            return Err(PromptError::invalid_input("request body must be a JSON object"));
        };

        let prompt = match fields.get("prompt") {
            None | Some(Value::Null) => return Err(PromptError::invalid_input("prompt is required")),
            Some(Value::String(s)) => s,
            Some(_) => return Err(PromptError::invalid_input("prompt must be a string")),
        };
        if prompt.trim().is_empty() {
            return Err(PromptError::invalid_input("prompt must not be empty"));
        }

        let target_ratio = match fields.get("targetRatio") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let ratio = v
                    .as_f64()
                    .ok_or_else(|| PromptError::invalid_input("targetRatio must be a number"))?;
                if !(ratio > 0.0 && ratio <= 1.0) {
                    return Err(PromptError::invalid_input(format!("targetRatio must be in (0, 1], got {ratio}")));
                }
                Some(ratio)
            }
        };

        Ok(Self { prompt: prompt.clone(), target_ratio })
    }
}
