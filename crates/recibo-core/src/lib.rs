//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - OCR text extraction from receipt photos (pure Rust, ONNX models)
//! - Prompt rendering for language-model-based structured extraction
//! - A Gemini client for the extraction call
//! - Sanitization and validation of model output into a single JSON document

pub mod error;
pub mod models;
pub mod ocr;
pub mod prompt;
pub mod llm;
pub mod sanitize;
pub mod pipeline;

pub use error::{ModelError, OcrError, ReciboError, Result};
pub use models::receipt::{DetailedReceipt, ExpenseCategory, ExpenseSummary};
pub use ocr::{OcrResult, TextBox, TextExtractor};
pub use prompt::{build_prompt, PromptVariant};
pub use llm::{GeminiClient, ModelClient};
pub use sanitize::sanitize_completion;
pub use pipeline::{run_from_text, validate_payload, PipelineResult, ReceiptPipeline, PROCESS_ERROR};
