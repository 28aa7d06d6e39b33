use super::*;

// =============================================================================
// Tool
// =============================================================================

#[test]
fn tool_default_is_exam_maker() {
    assert_eq!(Tool::default(), Tool::ExamMaker);
}

#[test]
fn tool_from_str_round_trips_every_tag() {
    for tool in Tool::ALL {
        assert_eq!(Tool::from_str(tool.as_str()), Some(tool));
    }
}

#[test]
fn tool_from_str_rejects_unknown() {
    assert_eq!(Tool::from_str("quiz"), None);
    assert_eq!(Tool::from_str(""), None);
}

#[test]
fn tool_serializes_as_snake_case_tag() {
    let json = serde_json::to_string(&Tool::LessonExplainer).unwrap();
    assert_eq!(json, "\"lesson_explainer\"");
}

#[test]
fn only_project_builder_refuses_attachments() {
    assert!(Tool::ExamMaker.accepts_attachments());
    assert!(Tool::LessonExplainer.accepts_attachments());
    assert!(!Tool::ProjectBuilder.accepts_attachments());
}

// =============================================================================
// ToolSettings
// =============================================================================

#[test]
fn default_settings_match_initial_view() {
    assert_eq!(
        ToolSettings::default_for(Tool::ExamMaker),
        ToolSettings::ExamMaker(ExamSettings { difficulty: ExamDifficulty::Medium, kind: ExamKind::MultipleChoice })
    );
    assert_eq!(
        ToolSettings::default_for(Tool::LessonExplainer),
        ToolSettings::LessonExplainer(LessonSettings { style: LessonStyle::Simple })
    );
    assert_eq!(ToolSettings::default_for(Tool::ProjectBuilder), ToolSettings::ProjectBuilder);
}

#[test]
fn settings_report_their_tool() {
    for tool in Tool::ALL {
        assert_eq!(ToolSettings::default_for(tool).tool(), tool);
    }
}

#[test]
fn settings_deserialize_from_tagged_json() {
    let json = r#"{"tool":"exam_maker","difficulty":"hard","kind":"true_false"}"#;
    let settings: ToolSettings = serde_json::from_str(json).unwrap();
    assert_eq!(
        settings,
        ToolSettings::ExamMaker(ExamSettings { difficulty: ExamDifficulty::Hard, kind: ExamKind::TrueFalse })
    );

    let settings: ToolSettings = serde_json::from_str(r#"{"tool":"project_builder"}"#).unwrap();
    assert_eq!(settings, ToolSettings::ProjectBuilder);
}

#[test]
fn settings_missing_fields_fall_back_to_defaults() {
    let settings: ToolSettings = serde_json::from_str(r#"{"tool":"lesson_explainer"}"#).unwrap();
    assert_eq!(settings, ToolSettings::LessonExplainer(LessonSettings::default()));
}
