//! The submission flow
//!
//! Owns the transcript and admits one inference at a time. A submission
//! snapshots history, appends the user turn, issues exactly one
//! inference request, and reconciles the reply back into the transcript.

use crate::conversation::{ConversationStore, ImageAttachment, Turn};
use crate::inference::{InferenceError, InferenceRequest, InferenceService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Submission carried no text and no image; nothing was sent
    #[error("submission is empty")]
    EmptySubmission,
    /// A prior submission is still in flight
    #[error("a request is already in flight")]
    Busy,
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// One browser session: the transcript plus single-flight submission state
pub struct ChatSession {
    store: Mutex<ConversationStore>,
    inference: Arc<dyn InferenceService>,
    sending: AtomicBool,
}

impl ChatSession {
    pub fn new(inference: Arc<dyn InferenceService>) -> Self {
        Self {
            store: Mutex::new(ConversationStore::new()),
            inference,
            sending: AtomicBool::new(false),
        }
    }

    /// Submit one user turn and await the complete assistant reply.
    ///
    /// On failure no assistant turn is appended; the user turn stays as a
    /// dangling entry and the session is immediately usable again.
    pub async fn submit(
        &self,
        text: String,
        image: Option<ImageAttachment>,
    ) -> Result<String, SubmitError> {
        if text.trim().is_empty() && image.is_none() {
            return Err(SubmitError::EmptySubmission);
        }

        // Single-flight: overlapping submissions are rejected, not queued.
        if self
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::Busy);
        }
        let _guard = SendingGuard {
            sending: &self.sending,
        };

        // The history snapshot excludes the turn being submitted.
        let history = {
            let mut store = self.store.lock().unwrap();
            let history = store.as_history();
            store.append(Turn::user(text.clone(), image.clone()));
            history
        };

        let request = InferenceRequest {
            history,
            text,
            image,
        };
        let reply = self.inference.generate(&request).await?;

        self.store
            .lock()
            .unwrap()
            .append(Turn::assistant(reply.clone()));
        Ok(reply)
    }

    /// Drop the whole transcript and start a fresh context
    pub fn clear(&self) {
        self.store.lock().unwrap().clear();
    }

    /// Snapshot of the transcript for rendering
    pub fn transcript(&self) -> Vec<Turn> {
        self.store.lock().unwrap().turns().to_vec()
    }
}

/// Resets the sending flag on every exit path out of `submit`
struct SendingGuard<'a> {
    sending: &'a AtomicBool,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.sending.store(false, Ordering::Release);
    }
}
