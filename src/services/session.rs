//! Sessions — one browser tab's worth of tool views.
//!
//! DESIGN
//! ======
//! A session mounts all three tool controllers and tracks which tab is
//! active. Only the active tool's view accepts input or submissions.
//! Switching tabs unmounts the tool being left, which resets its state.
//! Completed submissions are appended to the session's history.
//!
//! LIFECYCLE
//! =========
//! Every lookup through [`get_session`] refreshes the session's last-access
//! time. Browsers rarely send `DELETE` when a tab closes, so a background
//! sweep ([`spawn_session_sweeper`]) discards sessions idle for longer than
//! the configured timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::services::controller::{SubmitOutcome, ToolController, ToolSnapshot};
use crate::services::generation::GenerationClient;
use crate::services::history::{History, Interaction};
use crate::state::AppState;
use crate::tool::Tool;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("{requested} is not the active tool ({active} is)")]
    ToolNotActive { requested: Tool, active: Tool },
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SESSION_NOT_FOUND",
            Self::ToolNotActive { .. } => "E_TOOL_NOT_ACTIVE",
        }
    }
}

/// What the shell renders: the active tab and that tool's view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub active_tool: Tool,
    pub view: ToolSnapshot,
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    id: Uuid,
    exam: ToolController,
    lesson: ToolController,
    project: ToolController,
    active_tool: Mutex<Tool>,
    history: Arc<Mutex<History>>,
    last_access: Mutex<Instant>,
}

impl Session {
    #[must_use]
    pub fn new(generator: &Arc<GenerationClient>) -> Self {
        let history = Arc::new(Mutex::new(History::default()));
        let controller = |tool| ToolController::new(tool, Arc::clone(generator), Arc::clone(&history));
        Self {
            id: Uuid::new_v4(),
            exam: controller(Tool::ExamMaker),
            lesson: controller(Tool::LessonExplainer),
            project: controller(Tool::ProjectBuilder),
            active_tool: Mutex::new(Tool::default()),
            history,
            last_access: Mutex::new(Instant::now()),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn controller(&self, tool: Tool) -> &ToolController {
        match tool {
            Tool::ExamMaker => &self.exam,
            Tool::LessonExplainer => &self.lesson,
            Tool::ProjectBuilder => &self.project,
        }
    }

    pub async fn active_tool(&self) -> Tool {
        *self.active_tool.lock().await
    }

    /// Controller for `tool`, provided its view is the one mounted.
    ///
    /// # Errors
    ///
    /// [`SessionError::ToolNotActive`] if another tab is selected.
    pub async fn active_controller(&self, tool: Tool) -> Result<&ToolController, SessionError> {
        let active = self.active_tool().await;
        if active != tool {
            return Err(SessionError::ToolNotActive { requested: tool, active });
        }
        Ok(self.controller(tool))
    }

    /// Switch tabs. The tool being left is reset, as its view unmounts.
    pub async fn select_tool(&self, tool: Tool) {
        let mut active = self.active_tool.lock().await;
        if *active == tool {
            return;
        }
        let previous = std::mem::replace(&mut *active, tool);
        self.controller(previous).reset().await;
        info!(session_id = %self.id, from = %previous, to = %tool, "session: tab switched");
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let active_tool = self.active_tool().await;
        SessionSnapshot { id: self.id, active_tool, view: self.controller(active_tool).snapshot().await }
    }

    /// Submit the active tool. Completed interactions land in the history.
    ///
    /// # Errors
    ///
    /// [`SessionError::ToolNotActive`] if `tool` is not the selected tab.
    pub async fn submit(&self, tool: Tool) -> Result<SubmitOutcome, SessionError> {
        let controller = self.active_controller(tool).await?;
        Ok(controller.submit().await)
    }

    pub async fn history(&self) -> Vec<Interaction> {
        self.history.lock().await.entries()
    }

    pub async fn touch(&self, now: Instant) {
        let mut last = self.last_access.lock().await;
        *last = (*last).max(now);
    }

    /// Time since the last lookup, measured at `now`.
    pub async fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.last_access.lock().await)
    }

    async fn discard(&self) {
        for tool in Tool::ALL {
            self.controller(tool).reset().await;
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Mount a fresh session with the exam tab selected.
pub async fn create_session(state: &AppState) -> Arc<Session> {
    let session = Arc::new(Session::new(&state.generator));
    state
        .sessions
        .write()
        .await
        .insert(session.id(), Arc::clone(&session));
    info!(session_id = %session.id(), "session: created");
    session
}

/// Look up a session and mark it as in use.
///
/// # Errors
///
/// [`SessionError::NotFound`] for an unknown, deleted or expired session.
pub async fn get_session(state: &AppState, id: Uuid) -> Result<Arc<Session>, SessionError> {
    let session = state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or(SessionError::NotFound(id))?;
    session.touch(Instant::now()).await;
    Ok(session)
}

/// Discard a session and every tool view in it.
///
/// # Errors
///
/// [`SessionError::NotFound`] for an unknown or already deleted session.
pub async fn delete_session(state: &AppState, id: Uuid) -> Result<(), SessionError> {
    let session = state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or(SessionError::NotFound(id))?;
    session.discard().await;
    info!(session_id = %id, "session: deleted");
    Ok(())
}

// =============================================================================
// EXPIRY
// =============================================================================

pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Remove every session idle for at least `max_idle` as of `now`.
/// Returns how many were removed.
pub async fn expire_idle_sessions(state: &AppState, max_idle: Duration, now: Instant) -> usize {
    let expired: Vec<Arc<Session>> = {
        let mut sessions = state.sessions.write().await;
        let mut idle = Vec::new();
        for (id, session) in sessions.iter() {
            if session.idle_for(now).await >= max_idle {
                idle.push(*id);
            }
        }
        idle.iter().filter_map(|id| sessions.remove(id)).collect()
    };
    for session in &expired {
        session.discard().await;
        info!(session_id = %session.id(), "session: expired");
    }
    expired.len()
}

/// Spawn the background sweep that expires idle sessions.
pub fn spawn_session_sweeper(state: AppState, max_idle: Duration, every: Duration) -> JoinHandle<()> {
    info!(idle_timeout_secs = max_idle.as_secs(), sweep_interval_secs = every.as_secs(), "session expiry configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = expire_idle_sessions(&state, max_idle, Instant::now()).await;
            if removed > 0 {
                info!(removed, "session: sweep");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
