//! Tool controller — per-tool view state and the submit flow.
//!
//! DESIGN
//! ======
//! One controller per mounted tool view. A submission walks
//! Idle → Validating → Requesting → Succeeded → Idle:
//!
//! - Validating is synchronous: missing input sets the tool's validation
//!   message and stops before any provider call.
//! - Requesting clears the previous error/result, composes the prompt,
//!   encodes the attachment and calls the generation client once.
//! - Succeeded stores whatever text came back, including the fallback
//!   apology, since the generation client never fails.
//!
//! Requesting and Succeeded run on a spawned task that owns a handle to the
//! controller state, so the result is stored and loading cleared even when
//! the caller stops waiting. Completed interactions are appended to the
//! session history from the same task. The provider call itself runs on a
//! nested task; if it panics, or the attachment cannot be encoded, the
//! tool's generic failure message is set instead.
//!
//! Every submission takes the next sequence number. A response is applied
//! only while its number is still the latest one issued, so a slow earlier
//! request can never overwrite a later one. [`ToolController::reset`] also
//! bumps the sequence, which drops responses for a view that was unmounted.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::attachment::{AttachmentError, FileInfo, SelectedFile};
use crate::error::ErrorCode;
use crate::labels;
use crate::prompt;
use crate::services::generation::{GenerationClient, GenerationRequest, GenerationResult};
use crate::services::history::{History, Interaction, ToolInput};
use crate::tool::{Tool, ToolSettings};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("settings for {got} sent to {expected}")]
    SettingsMismatch { expected: Tool, got: Tool },
    #[error("{0} does not accept attachments")]
    AttachmentsNotAccepted(Tool),
    #[error("attachment rejected: {0}")]
    Attachment(#[from] AttachmentError),
}

impl ErrorCode for ControllerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SettingsMismatch { .. } => "E_SETTINGS_MISMATCH",
            Self::AttachmentsNotAccepted(_) => "E_ATTACHMENTS_NOT_ACCEPTED",
            Self::Attachment(e) => e.error_code(),
        }
    }
}

impl ControllerError {
    /// Arabic message for selection-time failures the user can correct.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::SettingsMismatch { .. } => None,
            Self::AttachmentsNotAccepted(_) => Some(labels::ATTACHMENTS_NOT_ACCEPTED_MESSAGE),
            Self::Attachment(e) => e.user_message(),
        }
    }
}

/// How a call to [`ToolController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required input missing; no request issued.
    Blocked,
    /// The result was stored on the controller.
    Completed { input: ToolInput, result: GenerationResult },
    /// The round trip broke down; the tool's failure message was stored.
    Failed,
    /// A newer submission or a reset superseded this one; nothing was stored.
    Superseded,
}

/// Read-only view of a controller, as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSnapshot {
    pub tool: Tool,
    pub source_text: String,
    pub source_file: Option<FileInfo>,
    pub settings: ToolSettings,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub result_text: Option<String>,
}

struct ToolState {
    source_text: String,
    source_file: Option<SelectedFile>,
    settings: ToolSettings,
    is_loading: bool,
    error_message: Option<String>,
    result_text: Option<String>,
    /// Sequence number of the most recent submission or reset.
    latest_seq: u64,
}

impl ToolState {
    fn new(tool: Tool, latest_seq: u64) -> Self {
        Self {
            source_text: String::new(),
            source_file: None,
            settings: ToolSettings::default_for(tool),
            is_loading: false,
            error_message: None,
            result_text: None,
            latest_seq,
        }
    }

    fn has_required_input(&self, tool: Tool) -> bool {
        match tool {
            Tool::ExamMaker | Tool::LessonExplainer => !self.source_text.is_empty() || self.source_file.is_some(),
            Tool::ProjectBuilder => !self.source_text.is_empty(),
        }
    }

    fn to_input(&self) -> ToolInput {
        let file = self.source_file.as_ref().map(SelectedFile::info);
        match self.settings {
            ToolSettings::ExamMaker(settings) => {
                ToolInput::ExamMaker { settings, source_text: self.source_text.clone(), file }
            }
            ToolSettings::LessonExplainer(settings) => {
                ToolInput::LessonExplainer { settings, source_text: self.source_text.clone(), file }
            }
            ToolSettings::ProjectBuilder => ToolInput::ProjectBuilder { project_idea: self.source_text.clone() },
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct ToolController {
    tool: Tool,
    generator: Arc<GenerationClient>,
    state: Arc<Mutex<ToolState>>,
    history: Arc<Mutex<History>>,
}

impl ToolController {
    #[must_use]
    pub fn new(tool: Tool, generator: Arc<GenerationClient>, history: Arc<Mutex<History>>) -> Self {
        Self { tool, generator, state: Arc::new(Mutex::new(ToolState::new(tool, 0))), history }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub async fn snapshot(&self) -> ToolSnapshot {
        let state = self.state.lock().await;
        ToolSnapshot {
            tool: self.tool,
            source_text: state.source_text.clone(),
            source_file: state.source_file.as_ref().map(SelectedFile::info),
            settings: state.settings,
            is_loading: state.is_loading,
            error_message: state.error_message.clone(),
            result_text: state.result_text.clone(),
        }
    }

    /// Replace the free-text input and, when given, the settings.
    ///
    /// # Errors
    ///
    /// [`ControllerError::SettingsMismatch`] if `settings` belong to another tool.
    pub async fn set_input(&self, source_text: String, settings: Option<ToolSettings>) -> Result<(), ControllerError> {
        if let Some(settings) = settings {
            if settings.tool() != self.tool {
                return Err(ControllerError::SettingsMismatch { expected: self.tool, got: settings.tool() });
            }
        }
        let mut state = self.state.lock().await;
        state.source_text = source_text;
        if let Some(settings) = settings {
            state.settings = settings;
        }
        Ok(())
    }

    /// Validate and attach a newly selected file. A rejected selection
    /// leaves the tool with no file attached.
    ///
    /// # Errors
    ///
    /// [`ControllerError::AttachmentsNotAccepted`] for the project builder,
    /// [`ControllerError::Attachment`] when size or type checks fail.
    pub async fn select_file(
        &self,
        name: Option<String>,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<FileInfo, ControllerError> {
        if !self.tool.accepts_attachments() {
            return Err(ControllerError::AttachmentsNotAccepted(self.tool));
        }
        let selected = SelectedFile::new(name, media_type, bytes);
        let mut state = self.state.lock().await;
        match selected {
            Ok(file) => {
                let info = file.info();
                info!(tool = %self.tool, media_type = %info.media_type, size = info.size, "controller: file attached");
                state.source_file = Some(file);
                Ok(info)
            }
            Err(e) => {
                warn!(tool = %self.tool, error = %e, "controller: file rejected");
                state.source_file = None;
                Err(e.into())
            }
        }
    }

    pub async fn remove_file(&self) {
        self.state.lock().await.source_file = None;
    }

    /// Discard all view state, as when the tool view unmounts. In-flight
    /// responses for this controller will be dropped.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let seq = state.latest_seq + 1;
        *state = ToolState::new(self.tool, seq);
    }

    /// Validate, then run the round trip on a spawned task. The outcome is
    /// applied by that task, so dropping the returned future does not lose it.
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = self.state.lock().await;
            if !state.has_required_input(self.tool) {
                info!(tool = %self.tool, "controller: submission blocked, input missing");
                state.error_message = Some(self.tool.validation_message().to_owned());
                return SubmitOutcome::Blocked;
            }
            state.latest_seq += 1;
            state.is_loading = true;
            state.error_message = None;
            state.result_text = None;
            Submission {
                tool: self.tool,
                seq: state.latest_seq,
                settings: state.settings,
                source_text: state.source_text.clone(),
                source_file: state.source_file.clone(),
                input: state.to_input(),
            }
        };

        info!(tool = %self.tool, seq = submission.seq, "controller: requesting");
        let task = tokio::spawn(submission.run(
            Arc::clone(&self.generator),
            Arc::clone(&self.state),
            Arc::clone(&self.history),
        ));
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(tool = %self.tool, error = %e, "controller: submission task failed");
                SubmitOutcome::Failed
            }
        }
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Everything one submission needs, captured when it passed validation.
struct Submission {
    tool: Tool,
    seq: u64,
    settings: ToolSettings,
    source_text: String,
    source_file: Option<SelectedFile>,
    input: ToolInput,
}

impl Submission {
    async fn run(
        self,
        generator: Arc<GenerationClient>,
        state: Arc<Mutex<ToolState>>,
        history: Arc<Mutex<History>>,
    ) -> SubmitOutcome {
        let tool = self.tool;
        let seq = self.seq;
        let outcome = request(generator, self.settings, &self.source_text, self.source_file).await;

        let mut state = state.lock().await;
        if state.latest_seq != seq {
            info!(%tool, seq, latest = state.latest_seq, "controller: dropping superseded response");
            return SubmitOutcome::Superseded;
        }
        state.is_loading = false;
        match outcome {
            Ok(result) => {
                state.result_text = Some(result.text().to_owned());
                drop(state);
                let interaction = Interaction::new(self.input.clone(), result.text().to_owned(), result.is_fallback());
                history.lock().await.push(interaction);
                SubmitOutcome::Completed { input: self.input, result }
            }
            Err(reason) => {
                warn!(%tool, seq, %reason, "controller: submission failed");
                state.error_message = Some(tool.failure_message().to_owned());
                SubmitOutcome::Failed
            }
        }
    }
}

/// Compose, encode and call the generation client on a separate task.
async fn request(
    generator: Arc<GenerationClient>,
    settings: ToolSettings,
    source_text: &str,
    source_file: Option<SelectedFile>,
) -> Result<GenerationResult, String> {
    let prompt = prompt::compose(&settings, source_text);
    let attachment = source_file
        .as_ref()
        .map(SelectedFile::encode)
        .transpose()
        .map_err(|e| e.to_string())?;
    let request = GenerationRequest::new(prompt, attachment).map_err(|e| e.to_string())?;

    tokio::spawn(async move { generator.generate(&request).await })
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
