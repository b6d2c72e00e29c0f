//! HTTP API binding the browser UI to the chat session

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::session::ChatSession;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ChatSession>,
}

impl AppState {
    pub fn new(session: Arc<ChatSession>) -> Self {
        Self { session }
    }
}
