use super::*;
use std::time::{Duration, Instant};
use crate::labels::FALLBACK_MESSAGE;
use crate::services::history::ToolInput;
use crate::state::test_helpers::{MockLlm, MockReply, test_app_state};

fn app(replies: Vec<MockReply>) -> (AppState, Arc<MockLlm>) {
    let llm = Arc::new(MockLlm::new(replies));
    (test_app_state(llm.clone()), llm)
}

// =========================================================================
// store
// =========================================================================

#[tokio::test]
async fn create_then_get_session() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    let fetched = get_session(&state, session.id()).await.unwrap();
    assert_eq!(fetched.id(), session.id());
}

#[tokio::test]
async fn get_unknown_session_is_not_found() {
    let (state, _) = app(vec![]);
    let id = Uuid::new_v4();
    let err = get_session(&state, id).await.err().unwrap();
    assert_eq!(err, SessionError::NotFound(id));
    assert_eq!(err.error_code(), "E_SESSION_NOT_FOUND");
}

#[tokio::test]
async fn delete_session_removes_it() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    delete_session(&state, session.id()).await.unwrap();
    assert!(get_session(&state, session.id()).await.is_err());
    assert_eq!(delete_session(&state, session.id()).await, Err(SessionError::NotFound(session.id())));
}

#[tokio::test]
async fn sessions_are_isolated() {
    let (state, _) = app(vec![]);
    let a = create_session(&state).await;
    let b = create_session(&state).await;
    a.controller(Tool::ExamMaker)
        .set_input("only in a".into(), None)
        .await
        .unwrap();
    assert!(b.controller(Tool::ExamMaker).snapshot().await.source_text.is_empty());
}

// =========================================================================
// tabs
// =========================================================================

#[tokio::test]
async fn new_session_shows_exam_tab() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    let snap = session.snapshot().await;
    assert_eq!(snap.active_tool, Tool::ExamMaker);
    assert_eq!(snap.view.tool, Tool::ExamMaker);
}

#[tokio::test]
async fn switching_tabs_resets_the_tool_left_behind() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    session
        .controller(Tool::ExamMaker)
        .set_input("draft".into(), None)
        .await
        .unwrap();
    session
        .controller(Tool::LessonExplainer)
        .set_input("kept".into(), None)
        .await
        .unwrap();

    session.select_tool(Tool::ProjectBuilder).await;

    assert_eq!(session.active_tool().await, Tool::ProjectBuilder);
    assert!(session.controller(Tool::ExamMaker).snapshot().await.source_text.is_empty());
    assert_eq!(session.controller(Tool::LessonExplainer).snapshot().await.source_text, "kept");
}

#[tokio::test]
async fn reselecting_active_tab_keeps_state() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    session
        .controller(Tool::ExamMaker)
        .set_input("draft".into(), None)
        .await
        .unwrap();
    session.select_tool(Tool::ExamMaker).await;
    assert_eq!(session.controller(Tool::ExamMaker).snapshot().await.source_text, "draft");
}

#[tokio::test]
async fn inactive_tool_cannot_be_driven() {
    let (state, llm) = app(vec![]);
    let session = create_session(&state).await;
    let err = session.submit(Tool::LessonExplainer).await.unwrap_err();
    assert_eq!(err, SessionError::ToolNotActive { requested: Tool::LessonExplainer, active: Tool::ExamMaker });
    assert!(session.active_controller(Tool::ProjectBuilder).await.is_err());
    assert!(llm.calls().is_empty());
}

// =========================================================================
// history
// =========================================================================

#[tokio::test]
async fn completed_submissions_are_recorded() {
    let (state, _) = app(vec![MockReply::Text("plan".into()), MockReply::Error]);
    let session = create_session(&state).await;
    session.select_tool(Tool::ProjectBuilder).await;
    let project = session.active_controller(Tool::ProjectBuilder).await.unwrap();
    project.set_input("robot".into(), None).await.unwrap();

    session.submit(Tool::ProjectBuilder).await.unwrap();
    session.submit(Tool::ProjectBuilder).await.unwrap();

    let history = session.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].input, ToolInput::ProjectBuilder { project_idea: "robot".into() });
    assert_eq!(history[0].output, "plan");
    assert!(!history[0].fallback);
    assert_eq!(history[1].output, FALLBACK_MESSAGE);
    assert!(history[1].fallback);
}

#[tokio::test]
async fn blocked_submissions_are_not_recorded() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    let outcome = session.submit(Tool::ExamMaker).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Blocked);
    assert!(session.history().await.is_empty());
}

// =========================================================================
// expiry
// =========================================================================

#[tokio::test]
async fn idle_session_is_expired() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    let later = Instant::now() + Duration::from_secs(61);

    let removed = expire_idle_sessions(&state, Duration::from_secs(60), later).await;

    assert_eq!(removed, 1);
    assert_eq!(get_session(&state, session.id()).await.err(), Some(SessionError::NotFound(session.id())));
}

#[tokio::test]
async fn recently_used_session_survives_sweep() {
    let (state, _) = app(vec![]);
    let idle = create_session(&state).await;
    let active = create_session(&state).await;
    let start = Instant::now();
    active.touch(start + Duration::from_secs(50)).await;

    let removed = expire_idle_sessions(&state, Duration::from_secs(60), start + Duration::from_secs(61)).await;

    assert_eq!(removed, 1);
    assert!(get_session(&state, active.id()).await.is_ok());
    assert!(get_session(&state, idle.id()).await.is_err());
}

#[tokio::test]
async fn fresh_session_is_not_expired() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    let removed = expire_idle_sessions(&state, Duration::from_secs(60), Instant::now()).await;
    assert_eq!(removed, 0);
    assert!(get_session(&state, session.id()).await.is_ok());
}

#[tokio::test]
async fn lookup_refreshes_last_access() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    tokio::time::sleep(Duration::from_millis(30)).await;
    let before = session.idle_for(Instant::now()).await;
    get_session(&state, session.id()).await.unwrap();
    assert!(session.idle_for(Instant::now()).await < before);
}

#[tokio::test]
async fn expired_session_drops_its_tool_state() {
    let (state, _) = app(vec![]);
    let session = create_session(&state).await;
    session
        .controller(Tool::ExamMaker)
        .set_input("draft".into(), None)
        .await
        .unwrap();
    expire_idle_sessions(&state, Duration::ZERO, Instant::now()).await;
    assert!(session.controller(Tool::ExamMaker).snapshot().await.source_text.is_empty());
}
