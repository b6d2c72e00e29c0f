//! Mock inference services for tests
//!
//! These enable exercising the submission flow without real network I/O.

use super::{InferenceError, InferenceRequest, InferenceService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock service that returns queued replies and records every request
pub struct MockInferenceService {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<InferenceRequest>>,
}

impl MockInferenceService {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue an error
    pub fn queue_error(&self, error: InferenceError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockInferenceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceService for MockInferenceService {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::network("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

/// Mock that suspends until released, for exercising the single-flight
/// guard while a request is outstanding
pub struct GatedInferenceService {
    release: tokio::sync::Notify,
}

impl GatedInferenceService {
    pub fn new() -> Self {
        Self {
            release: tokio::sync::Notify::new(),
        }
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

impl Default for GatedInferenceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceService for GatedInferenceService {
    async fn generate(&self, _request: &InferenceRequest) -> Result<String, InferenceError> {
        self.release.notified().await;
        Ok("released".to_string())
    }

    fn model_id(&self) -> &str {
        "gated-model"
    }
}
