//! Interaction records for a session's completed submissions.

use std::collections::VecDeque;

use serde::Serialize;
use uuid::Uuid;

use crate::attachment::FileInfo;
use crate::tool::{ExamSettings, LessonSettings, Tool};

/// Oldest records are dropped beyond this many per session.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// What the user submitted, tagged by the tool that received it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolInput {
    ExamMaker { settings: ExamSettings, source_text: String, file: Option<FileInfo> },
    LessonExplainer { settings: LessonSettings, source_text: String, file: Option<FileInfo> },
    ProjectBuilder { project_idea: String },
}

impl ToolInput {
    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Self::ExamMaker { .. } => Tool::ExamMaker,
            Self::LessonExplainer { .. } => Tool::LessonExplainer,
            Self::ProjectBuilder { .. } => Tool::ProjectBuilder,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub id: Uuid,
    pub input: ToolInput,
    pub output: String,
    /// `true` when `output` is the fallback apology rather than generated text.
    pub fallback: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Interaction {
    #[must_use]
    pub fn new(input: ToolInput, output: String, fallback: bool) -> Self {
        Self { id: Uuid::new_v4(), input, output, fallback, timestamp: now_ms() }
    }
}

/// Bounded, oldest-first log of interactions.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<Interaction>,
}

impl History {
    pub fn push(&mut self, interaction: Interaction) {
        if self.entries.len() == MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(interaction);
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Interaction> {
        self.entries.iter().cloned().collect()
    }
}

fn now_ms() -> i64 {
    i64::try_from(time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0)
}
