//! Inference client abstraction
//!
//! One trait seam between the submission flow and the hosted
//! generative-language service, so the session logic can be exercised
//! against fakes.

mod error;
mod gemini;

#[cfg(test)]
pub mod testing;

pub use error::{InferenceError, InferenceErrorKind};
pub use gemini::GeminiClient;

use crate::conversation::{HistoryEntry, ImageAttachment};
use async_trait::async_trait;
use std::sync::Arc;

/// One (history, new input) pair awaiting exactly one assistant reply
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    /// Prior transcript, role/text only. Ignored for image-bearing
    /// requests, which are stateless with respect to prior turns.
    pub history: Vec<HistoryEntry>,
    /// The new user message; may be empty when an image is attached
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// Common interface to the hosted generative-language service
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Produce the complete reply text for one request.
    ///
    /// Issues exactly one outbound call, no retries, and resolves only
    /// when the full text is available. Callers must not assume partial
    /// output on failure.
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for inference services
pub struct LoggingService {
    inner: Arc<dyn InferenceService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn InferenceService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl InferenceService for LoggingService {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    multimodal = request.image.is_some(),
                    history_len = request.history.len(),
                    reply_chars = reply.len(),
                    "Inference request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Inference request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
