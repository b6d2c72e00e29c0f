//! API request and response types

use crate::conversation::Turn;
use serde::{Deserialize, Serialize};

/// Request to submit a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: String,
    pub image: Option<ImagePayload>,
}

/// Inline image in a chat submission
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub data: String,
    pub media_type: String,
}

/// Response for a settled chat submission
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response with the full transcript
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<Turn>,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
