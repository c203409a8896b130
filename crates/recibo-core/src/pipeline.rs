//! Pipeline orchestration: extract, prompt, invoke, sanitize, validate.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ReciboError;
use crate::llm::ModelClient;
use crate::ocr::TextExtractor;
use crate::prompt::{build_prompt, PromptVariant};
use crate::sanitize::sanitize_completion;

/// Error string attached to every failure document.
pub const PROCESS_ERROR: &str = "Failed to process receipt";

/// The single value the pipeline ever emits.
///
/// Serializes untagged: a success is the extracted document itself, a
/// failure is `{"error": ..., "details": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PipelineResult {
    /// The parsed extraction document, forwarded without schema enforcement.
    Success(Value),

    /// A normalized failure document.
    Failure { error: String, details: String },
}

impl PipelineResult {
    /// Build the normalized failure document from an internal fault.
    pub fn failure(details: impl std::fmt::Display) -> Self {
        Self::Failure {
            error: PROCESS_ERROR.to_string(),
            details: details.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Deserialize a success document into a typed schema.
    ///
    /// The advisory schemas in [`crate::models::receipt`] are the intended
    /// targets. Returns `None` for failures or documents that do not fit.
    pub fn parse_success<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Success(value) => serde_json::from_value(value.clone()).ok(),
            Self::Failure { .. } => None,
        }
    }
}

/// Strict-parse a sanitized candidate into the pipeline's terminal result.
///
/// A successful parse is forwarded verbatim: missing fields, wrong types,
/// or extra fields are the caller's concern, not corrected here.
pub fn validate_payload(candidate: &str) -> PipelineResult {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => PipelineResult::Success(value),
        Err(e) => PipelineResult::Failure {
            error: PROCESS_ERROR.to_string(),
            details: e.to_string(),
        },
    }
}

/// Run the prompting, invocation, sanitization, and validation stages on
/// already extracted text.
///
/// An empty `raw_text` is valid; the template still renders. Model faults
/// are normalized into the failure document here.
pub async fn run_from_text<C: ModelClient>(
    model: &C,
    raw_text: &str,
    variant: PromptVariant,
) -> PipelineResult {
    let prompt = build_prompt(variant, raw_text);

    let completion = match model.complete(&prompt).await {
        Ok(completion) => completion,
        Err(e) => return PipelineResult::failure(ReciboError::Model(e)),
    };

    let candidate = sanitize_completion(&completion);
    debug!("validating {} byte candidate", candidate.len());

    validate_payload(&candidate)
}

/// Receipt extraction pipeline.
///
/// Strictly linear, one document per run: OCR extraction, prompt
/// rendering, a single model invocation, sanitization, validation. Every
/// internal fault is caught at this boundary and converted into the same
/// failure document, so exactly one [`PipelineResult`] comes out.
pub struct ReceiptPipeline<C: ModelClient> {
    extractor: TextExtractor,
    model: C,
}

impl<C: ModelClient> ReceiptPipeline<C> {
    pub fn new(extractor: TextExtractor, model: C) -> Self {
        Self { extractor, model }
    }

    /// Run the full pipeline on an image file.
    pub async fn run(&self, image_path: &Path, variant: PromptVariant) -> PipelineResult {
        let ocr = match self.extractor.extract(image_path) {
            Ok(ocr) => ocr,
            Err(e) => return PipelineResult::failure(ReciboError::Ocr(e)),
        };

        debug!("OCR produced {} detections", ocr.boxes.len());

        run_from_text(&self.model, &ocr.text, variant).await
    }
}
