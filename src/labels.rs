//! Localized (Arabic) display strings, keyed by closed tags.
//!
//! Prompts are written in Arabic and user-facing messages are shown in
//! Arabic, so every label the prompt composer or a controller needs is
//! looked up here rather than stored on the tag itself.

use crate::tool::{ExamDifficulty, ExamKind, LessonStyle, Tool};

/// Substituted for any provider or network failure.
pub const FALLBACK_MESSAGE: &str = "حدث خطأ أثناء التواصل مع الذكاء الاصطناعي. يرجى المحاولة مرة أخرى.";

pub const FILE_TOO_LARGE_MESSAGE: &str = "حجم الملف يتجاوز الحد المسموح به (10 ميجابايت).";
pub const UNSUPPORTED_FILE_MESSAGE: &str = "نوع الملف غير مدعوم. يدعم الصور, PDF, Word, TXT";
pub const EMPTY_FILE_MESSAGE: &str = "الملف فارغ.";
pub const ATTACHMENTS_NOT_ACCEPTED_MESSAGE: &str = "هذه الأداة لا تقبل الملفات.";

impl Tool {
    /// Tab title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExamMaker => "صانع الامتحانات",
            Self::LessonExplainer => "شرح الدروس",
            Self::ProjectBuilder => "باني المشاريع",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ExamMaker => "ارفع مستندًا أو الصق نصًا لإنشاء اختبار مخصص على الفور.",
            Self::LessonExplainer => "بسّط المواضيع المعقدة إلى شروحات سهلة بأنماط تفكير مختلفة.",
            Self::ProjectBuilder => "حوّل أفكارك إلى خطط مشاريع قابلة للتنفيذ في دقائق.",
        }
    }

    /// Shown when a submission is missing its required input.
    #[must_use]
    pub fn validation_message(self) -> &'static str {
        match self {
            Self::ExamMaker => "يرجى تقديم بعض النص أو تحميل ملف لإنشاء الامتحان.",
            Self::LessonExplainer => "يرجى تقديم نص أو تحميل ملف للحصول على شرح.",
            Self::ProjectBuilder => "يرجى إدخال فكرة مشروع للبدء.",
        }
    }

    /// Shown when the generation round trip breaks down before producing text.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::ExamMaker => "فشل في إنشاء الامتحان. يرجى المحاولة مرة أخرى.",
            Self::LessonExplainer => "فشل في إنشاء الشرح. يرجى المحاولة مرة أخرى.",
            Self::ProjectBuilder => "فشل في بناء خطة المشروع. يرجى المحاولة مرة أخرى.",
        }
    }
}

impl ExamDifficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "سهل",
            Self::Medium => "متوسط",
            Self::Hard => "صعب",
        }
    }
}

impl ExamKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "اختيار من متعدد",
            Self::FillInTheBlank => "املأ الفراغ",
            Self::TrueFalse => "صح / خطأ",
            Self::Integrated => "امتحان متكامل",
        }
    }
}

impl LessonStyle {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Philosophical => "فلسفي",
            Self::Scientific => "علمي",
            Self::Simple => "بسيط للطلاب",
        }
    }
}
