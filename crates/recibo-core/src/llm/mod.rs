//! Language-model client for the extraction call.

mod gemini;

pub use gemini::{GeminiClient, API_KEY_ENV};

use crate::error::ModelError;

/// A language-model capability: one prompt in, one completion out.
///
/// The pipeline is generic over this seam so tests can substitute a
/// scripted client for the network-backed one.
pub trait ModelClient {
    /// Issue a single completion request. No retries, no streaming.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;
}
