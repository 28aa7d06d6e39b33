//! Prompt composer — tool settings + source text → instruction string.
//!
//! DESIGN
//! ======
//! Each composer is a pure function. The output always has the same four
//! blocks: a persona preamble, one labeled line per setting, the source text
//! verbatim, and a fixed instruction block describing the expected markdown
//! output. Empty source text still yields a prompt; blocking empty
//! submissions is the controller's job.

use std::fmt::Write;

use crate::tool::{ExamSettings, LessonSettings, ToolSettings};

pub const DIFFICULTY_LABEL: &str = "مستوى الصعوبة";
pub const EXAM_KIND_LABEL: &str = "نوع الاختبار";
pub const STYLE_LABEL: &str = "الأسلوب";

/// Compose the prompt for whichever tool `settings` belongs to.
#[must_use]
pub fn compose(settings: &ToolSettings, source_text: &str) -> String {
    match settings {
        ToolSettings::ExamMaker(exam) => compose_exam(exam, source_text),
        ToolSettings::LessonExplainer(lesson) => compose_lesson(lesson, source_text),
        ToolSettings::ProjectBuilder => compose_project(source_text),
    }
}

#[must_use]
pub fn compose_exam(settings: &ExamSettings, source_text: &str) -> String {
    let mut prompt = String::from(
        "أنت مساعد ذكاء اصطناعي متخصص في إنشاء الاختبارات التعليمية.\n\
         قم بإنشاء اختبار كامل بناءً على المحتوى المقدم.\n\n\
         المعلمات:\n",
    );
    let _ = writeln!(prompt, "- {DIFFICULTY_LABEL}: {}", settings.difficulty.label());
    let _ = writeln!(prompt, "- {EXAM_KIND_LABEL}: {}", settings.kind.label());

    push_source(&mut prompt, "المحتوى:", source_text);

    prompt.push_str(
        "التعليمات:\n\
         - قم بتنسيق المخرجات بصيغة ماركداون نظيفة ومنظمة جيدًا باللغة العربية.\n\
         - بالنسبة لأسئلة الاختيار من متعدد، قدم 4 خيارات وحدد الإجابة الصحيحة بوضوح.\n\
         - بالنسبة لأسئلة املأ الفراغ، استخدم الشرطة السفلية (_) للمساحة الفارغة.\n\
         - بالنسبة للاختبارات المتكاملة، قم بتضمين مزيج من جميع أنواع الأسئلة.\n\
         - بعد كل الأسئلة، قدم قسمًا منفصلاً لمفتاح الإجابات.\n",
    );
    prompt
}

#[must_use]
pub fn compose_lesson(settings: &LessonSettings, source_text: &str) -> String {
    let style = settings.style.label();
    let mut prompt = String::from(
        "أنت مساعد ذكاء اصطناعي متخصص في شرح المواضيع المعقدة بأساليب مختلفة.\n\
         هدفك هو تقديم شرح واضح وسهل الفهم ومصمم خصيصًا للأسلوب المختار باللغة العربية.\n\n",
    );
    let _ = writeln!(prompt, "- {STYLE_LABEL}: {style}");

    push_source(&mut prompt, "المحتوى المراد شرحه:", source_text);

    prompt.push_str("التعليمات:\n");
    let _ = writeln!(prompt, "- اشرح المحتوى بأسلوب تفكير \"{style}\".");
    prompt.push_str(
        "- استخدم أمثلة بسيطة وتشبيهات وبنية واضحة.\n\
         - إذا أمكن، اقترح أفكارًا مرئية بسيطة أو رسومًا بيانية يمكن أن توضح النقاط.\n\
         - قم بتنسيق المخرجات بصيغة ماركداون منظمة جيدًا باللغة العربية.\n",
    );
    prompt
}

#[must_use]
pub fn compose_project(project_idea: &str) -> String {
    let mut prompt = String::from(
        "أنت مساعد ذكاء اصطناعي تساعد الطلاب والمحترفين في تخطيط المشاريع.\n\
         بناءً على فكرة المشروع المقدمة، قم بإنشاء خطة مشروع شاملة باللغة العربية.\n\n",
    );

    push_source(&mut prompt, "فكرة المشروع:", project_idea);

    prompt.push_str(
        "التعليمات:\n\
         - قم بإنشاء خطة مشروع مفصلة بناءً على الفكرة.\n\
         - يجب أن تكون المخرجات بصيغة ماركداون منظمة جيدًا باللغة العربية.\n\
         - قم بتضمين الأقسام التالية بعناوين واضحة:\n",
    );
    for (i, (title, detail)) in PROJECT_SECTIONS.iter().enumerate() {
        let _ = writeln!(prompt, "  {}. **{title}:** {detail}", i + 1);
    }
    prompt
}

/// The five sections every project plan must contain, in order.
pub const PROJECT_SECTIONS: [(&str, &str); 5] = [
    ("الفكرة العامة", "نظرة عامة موجزة."),
    ("الأهداف", "أهداف واضحة وقابلة للقياس (أهداف SMART إن أمكن)."),
    ("خطة العمل والتنفيذ", "خطة خطوة بخطوة مع مراحل مقدرة أو جدول زمني."),
    ("الأدوات والتقنيات المقترحة", "البرامج أو اللغات أو الموارد الأخرى الموصى بها."),
    ("ملخص العرض التقديمي", "نقاط رئيسية لعرض تقديمي أو لعرض المشروع."),
];

/// Append a heading followed by the source text exactly as given.
fn push_source(prompt: &mut String, heading: &str, source_text: &str) {
    prompt.push('\n');
    prompt.push_str(heading);
    prompt.push('\n');
    prompt.push_str(source_text);
    prompt.push_str("\n\n");
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
