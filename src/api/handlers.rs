//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, ImagePayload, SuccessResponse, TranscriptResponse,
};
use super::AppState;
use crate::conversation::ImageAttachment;
use crate::session::SubmitError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;

/// Shown in place of the missing answer when inference fails
const APOLOGY: &str = "Sorry - Something went wrong. Please try again!";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Transcript retrieval
        .route("/api/transcript", get(get_transcript))
        // Submission
        .route("/api/chat", post(send_chat))
        // Fresh session context
        .route("/api/clear", post(clear_transcript))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn get_transcript(State(state): State<AppState>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        turns: state.session.transcript(),
    })
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let image = req.image.map(validate_image).transpose()?;

    let reply = state
        .session
        .submit(req.text, image)
        .await
        .map_err(|e| match e {
            SubmitError::EmptySubmission => {
                AppError::BadRequest("Ask a question or attach an image".to_string())
            }
            SubmitError::Busy => AppError::Busy,
            SubmitError::Inference(cause) => {
                tracing::error!(
                    kind = ?cause.kind,
                    error = %cause.message,
                    "Inference failed; answering with apology"
                );
                AppError::Upstream
            }
        })?;

    Ok(Json(ChatResponse { reply }))
}

/// Check the declared MIME type and base64 payload before anything is sent
fn validate_image(payload: ImagePayload) -> Result<ImageAttachment, AppError> {
    if !payload.media_type.starts_with("image/") {
        return Err(AppError::BadRequest(format!(
            "Unsupported attachment type: {}",
            payload.media_type
        )));
    }
    if base64::engine::general_purpose::STANDARD
        .decode(&payload.data)
        .is_err()
    {
        return Err(AppError::BadRequest(
            "Image data is not valid base64".to_string(),
        ));
    }
    Ok(ImageAttachment {
        data: payload.data,
        media_type: payload.media_type,
    })
}

async fn clear_transcript(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.session.clear();
    Json(SuccessResponse { success: true })
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

enum AppError {
    BadRequest(String),
    Busy,
    Upstream,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Busy => (
                StatusCode::CONFLICT,
                "A question is already being answered".to_string(),
            ),
            AppError::Upstream => (StatusCode::BAD_GATEWAY, APOLOGY.to_string()),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
