//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API for the browser front-end: a tool catalogue, session lifecycle,
//! tab selection, and per-tool input/file/submit endpoints. When a static
//! directory is configured, the front-end assets are served for every
//! non-API path.

pub mod sessions;

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::attachment::{ACCEPTED_MEDIA_TYPES, AttachmentError, MAX_ATTACHMENT_BYTES};
use crate::error::ErrorCode;
use crate::services::controller::ControllerError;
use crate::services::session::SessionError;
use crate::state::AppState;
use crate::tool::{ExamDifficulty, ExamKind, LessonStyle, Tool};

/// Request bodies above this are refused before reaching the handlers.
/// Slightly above the attachment cap, so oversized files still get the
/// localized rejection from the attachment checks.
const MAX_BODY_BYTES: usize = MAX_ATTACHMENT_BYTES + 1024 * 1024;

/// API routes shared by the front-end and any HTTP client.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/tools", get(list_tools))
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/{id}", get(sessions::get_session).delete(sessions::delete_session))
        .route("/api/sessions/{id}/active-tool", put(sessions::select_tool))
        .route("/api/sessions/{id}/history", get(sessions::history))
        .route("/api/sessions/{id}/tools/{tool}", get(sessions::get_tool))
        .route("/api/sessions/{id}/tools/{tool}/input", put(sessions::set_input))
        .route(
            "/api/sessions/{id}/tools/{tool}/file",
            put(sessions::put_file).delete(sessions::delete_file),
        )
        .route("/api/sessions/{id}/tools/{tool}/submit", post(sessions::submit))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application router: API plus optional static front-end.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state);
    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TOOL CATALOGUE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SettingOption {
    pub value: serde_json::Value,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SettingField {
    pub name: &'static str,
    pub options: Vec<SettingOption>,
}

/// One tab of the shell, with everything its view needs to render.
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub tool: Tool,
    pub title: &'static str,
    pub description: &'static str,
    pub settings: Vec<SettingField>,
    pub accepted_media_types: Vec<&'static str>,
    pub max_attachment_bytes: usize,
}

fn options<T: Serialize + Copy>(values: &[T], label: fn(T) -> &'static str) -> Vec<SettingOption> {
    values
        .iter()
        .map(|&v| SettingOption { value: serde_json::to_value(v).unwrap_or_default(), label: label(v) })
        .collect()
}

fn tool_info(tool: Tool) -> ToolInfo {
    let settings = match tool {
        Tool::ExamMaker => vec![
            SettingField { name: "difficulty", options: options(&ExamDifficulty::ALL, ExamDifficulty::label) },
            SettingField { name: "kind", options: options(&ExamKind::ALL, ExamKind::label) },
        ],
        Tool::LessonExplainer => {
            vec![SettingField { name: "style", options: options(&LessonStyle::ALL, LessonStyle::label) }]
        }
        Tool::ProjectBuilder => Vec::new(),
    };
    let (accepted_media_types, max_attachment_bytes) = if tool.accepts_attachments() {
        (ACCEPTED_MEDIA_TYPES.to_vec(), MAX_ATTACHMENT_BYTES)
    } else {
        (Vec::new(), 0)
    };
    ToolInfo {
        tool,
        title: tool.label(),
        description: tool.description(),
        settings,
        accepted_media_types,
        max_attachment_bytes,
    }
}

/// `GET /api/tools` — the shell's tabs, in display order.
async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(Tool::ALL.into_iter().map(tool_info).collect())
}

// =============================================================================
// ERRORS
// =============================================================================

/// JSON error body: `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, err: &impl ErrorCode, user_message: Option<&str>) -> Self {
        let message = user_message.map_or_else(|| err.to_string(), str::to_owned);
        Self { status, code: err.error_code(), message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": { "code": self.code, "message": self.message } });
        (self.status, Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let status = match err {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::ToolNotActive { .. } => StatusCode::CONFLICT,
        };
        Self::new(status, &err, None)
    }
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        let status = match &err {
            ControllerError::SettingsMismatch { .. } | ControllerError::Attachment(AttachmentError::Empty) => {
                StatusCode::BAD_REQUEST
            }
            ControllerError::AttachmentsNotAccepted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ControllerError::Attachment(AttachmentError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ControllerError::Attachment(AttachmentError::UnsupportedType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ControllerError::Attachment(AttachmentError::Read(_) | AttachmentError::Decode(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, &err, err.user_message())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
