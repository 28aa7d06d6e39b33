//! Session and tool-view routes.
//!
//! Handlers translate HTTP into calls on [`crate::services::session`] and
//! its controllers. Mutations and submissions are only accepted for the
//! session's active tool; reads are allowed for any tool.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiError;
use crate::services::controller::{SubmitOutcome, ToolSnapshot};
use crate::services::history::Interaction;
use crate::services::session::{self, SessionSnapshot};
use crate::state::AppState;
use crate::tool::{Tool, ToolSettings};

/// Optional original file name for uploads, since the body is raw bytes.
pub const FILE_NAME_HEADER: &str = "x-file-name";

#[derive(Debug, Deserialize)]
pub struct SelectToolBody {
    pub tool: Tool,
}

#[derive(Debug, Deserialize)]
pub struct SetInputBody {
    #[serde(default)]
    pub source_text: String,
    pub settings: Option<ToolSettings>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: &'static str,
    pub view: ToolSnapshot,
}

fn parse_tool(raw: &str) -> Result<Tool, ApiError> {
    Tool::from_str(raw).ok_or_else(|| ApiError {
        status: StatusCode::NOT_FOUND,
        code: "E_UNKNOWN_TOOL",
        message: format!("unknown tool: {raw}"),
    })
}

fn outcome_name(outcome: &SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Blocked => "blocked",
        SubmitOutcome::Completed { .. } => "completed",
        SubmitOutcome::Failed => "failed",
        SubmitOutcome::Superseded => "superseded",
    }
}

// =============================================================================
// SESSIONS
// =============================================================================

/// `POST /api/sessions` — mount a new session on the exam tab.
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionSnapshot>) {
    let session = session::create_session(&state).await;
    (StatusCode::CREATED, Json(session.snapshot().await))
}

/// `GET /api/sessions/{id}` — active tab and its view.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = session::get_session(&state, id).await?;
    Ok(Json(session.snapshot().await))
}

/// `DELETE /api/sessions/{id}`
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    session::delete_session(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/sessions/{id}/active-tool` — switch tabs.
pub async fn select_tool(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectToolBody>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = session::get_session(&state, id).await?;
    session.select_tool(body.tool).await;
    Ok(Json(session.snapshot().await))
}

/// `GET /api/sessions/{id}/history` — completed interactions, oldest first.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let session = session::get_session(&state, id).await?;
    Ok(Json(session.history().await))
}

// =============================================================================
// TOOL VIEWS
// =============================================================================

/// `GET /api/sessions/{id}/tools/{tool}`
pub async fn get_tool(
    State(state): State<AppState>,
    Path((id, tool)): Path<(Uuid, String)>,
) -> Result<Json<ToolSnapshot>, ApiError> {
    let tool = parse_tool(&tool)?;
    let session = session::get_session(&state, id).await?;
    Ok(Json(session.controller(tool).snapshot().await))
}

/// `PUT /api/sessions/{id}/tools/{tool}/input` — source text and settings.
pub async fn set_input(
    State(state): State<AppState>,
    Path((id, tool)): Path<(Uuid, String)>,
    Json(body): Json<SetInputBody>,
) -> Result<Json<ToolSnapshot>, ApiError> {
    let tool = parse_tool(&tool)?;
    let session = session::get_session(&state, id).await?;
    let controller = session.active_controller(tool).await?;
    controller.set_input(body.source_text, body.settings).await?;
    Ok(Json(controller.snapshot().await))
}

/// `PUT /api/sessions/{id}/tools/{tool}/file` — raw file body; the media
/// type comes from `Content-Type`.
pub async fn put_file(
    State(state): State<AppState>,
    Path((id, tool)): Path<(Uuid, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ToolSnapshot>, ApiError> {
    let tool = parse_tool(&tool)?;
    let session = session::get_session(&state, id).await?;
    let controller = session.active_controller(tool).await?;

    let media_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let name = headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|n| !n.is_empty())
        .map(str::to_owned);

    controller.select_file(name, media_type, body.to_vec()).await?;
    Ok(Json(controller.snapshot().await))
}

/// `DELETE /api/sessions/{id}/tools/{tool}/file`
pub async fn delete_file(
    State(state): State<AppState>,
    Path((id, tool)): Path<(Uuid, String)>,
) -> Result<Json<ToolSnapshot>, ApiError> {
    let tool = parse_tool(&tool)?;
    let session = session::get_session(&state, id).await?;
    let controller = session.active_controller(tool).await?;
    controller.remove_file().await;
    Ok(Json(controller.snapshot().await))
}

/// `POST /api/sessions/{id}/tools/{tool}/submit` — runs the generation
/// round trip and returns the view once it settles.
pub async fn submit(
    State(state): State<AppState>,
    Path((id, tool)): Path<(Uuid, String)>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let tool = parse_tool(&tool)?;
    let session = session::get_session(&state, id).await?;
    let outcome = session.submit(tool).await?;
    let view = session.controller(tool).snapshot().await;
    Ok(Json(SubmitResponse { outcome: outcome_name(&outcome), view }))
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
