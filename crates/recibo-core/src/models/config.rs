//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the recibo pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Language-model configuration.
    pub llm: LlmConfig,
}

impl Default for ReciboConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Vertical tolerance in pixels when grouping boxes into rows.
    pub row_tolerance: f32,

    /// Keep [UNK] placeholder tokens in recognized text.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            row_tolerance: 20.0,
            keep_unk: false,
        }
    }
}

/// Language-model endpoint configuration.
///
/// The API credential is deliberately not part of this struct: it is read
/// from the environment at startup and passed into the client constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent to the endpoint.
    pub model: String,

    /// Base URL of the generative API.
    pub endpoint: String,

    /// Completion token budget.
    pub max_output_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            max_output_tokens: 2048,
            temperature: 0.0,
        }
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_survive_partial_config() {
        let config: ReciboConfig =
            serde_json::from_str(r#"{"llm": {"model": "gemini-1.5-pro"}}"#).unwrap();
        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.llm.max_output_tokens, 2048);
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn default_llm_targets_gemini_flash() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.endpoint.starts_with("https://"));
    }
}
