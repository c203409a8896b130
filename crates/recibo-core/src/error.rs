//! Error types for the recibo-core library.

use thiserror::Error;

/// Main error type for the recibo library.
#[derive(Error, Debug)]
pub enum ReciboError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Language-model invocation error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The image file is missing or cannot be decoded.
    #[error("failed to read image {path}: {reason}")]
    ImageRead { path: String, reason: String },

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors related to the language-model invocation.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried no completion text.
    #[error("response contained no completion")]
    EmptyCompletion,

    /// The credential was not supplied.
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
}

/// Result type for the recibo library.
pub type Result<T> = std::result::Result<T, ReciboError>;
