//! Tool identities and per-tool settings.
//!
//! DESIGN
//! ======
//! These are closed tags used for matching and on the wire (`snake_case`).
//! Human-readable text for each tag lives in [`crate::labels`], so display
//! strings can change without touching comparison logic.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOOL
// =============================================================================

/// One of the three content-generation tools (one tab each).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    ExamMaker,
    LessonExplainer,
    ProjectBuilder,
}

impl Tool {
    /// Tab order.
    pub const ALL: [Tool; 3] = [Tool::ExamMaker, Tool::LessonExplainer, Tool::ProjectBuilder];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExamMaker => "exam_maker",
            Self::LessonExplainer => "lesson_explainer",
            Self::ProjectBuilder => "project_builder",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == raw)
    }

    /// Whether the tool's view offers a file attachment next to the text input.
    #[must_use]
    pub fn accepts_attachments(self) -> bool {
        !matches!(self, Self::ProjectBuilder)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// EXAM SETTINGS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl ExamDifficulty {
    pub const ALL: [ExamDifficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamKind {
    #[default]
    MultipleChoice,
    FillInTheBlank,
    TrueFalse,
    /// A mix of every other question type.
    Integrated,
}

impl ExamKind {
    pub const ALL: [ExamKind; 4] = [Self::MultipleChoice, Self::FillInTheBlank, Self::TrueFalse, Self::Integrated];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSettings {
    #[serde(default)]
    pub difficulty: ExamDifficulty,
    #[serde(default)]
    pub kind: ExamKind,
}

// =============================================================================
// LESSON SETTINGS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStyle {
    Philosophical,
    Scientific,
    #[default]
    Simple,
}

impl LessonStyle {
    pub const ALL: [LessonStyle; 3] = [Self::Philosophical, Self::Scientific, Self::Simple];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSettings {
    #[serde(default)]
    pub style: LessonStyle,
}

// =============================================================================
// TOOL SETTINGS
// =============================================================================

/// Settings payload tagged by the tool it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolSettings {
    ExamMaker(ExamSettings),
    LessonExplainer(LessonSettings),
    /// The project builder takes the idea text only.
    ProjectBuilder,
}

impl ToolSettings {
    /// Settings a freshly mounted tool view starts with.
    #[must_use]
    pub fn default_for(tool: Tool) -> Self {
        match tool {
            Tool::ExamMaker => Self::ExamMaker(ExamSettings::default()),
            Tool::LessonExplainer => Self::LessonExplainer(LessonSettings::default()),
            Tool::ProjectBuilder => Self::ProjectBuilder,
        }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Self::ExamMaker(_) => Tool::ExamMaker,
            Self::LessonExplainer(_) => Tool::LessonExplainer,
            Self::ProjectBuilder => Tool::ProjectBuilder,
        }
    }
}

#[cfg(test)]
#[path = "tool_test.rs"]
mod tests;
