use super::*;
use crate::attachment::{SelectedFile, decode};
use crate::state::test_helpers::{MockLlm, MockReply};

fn client(llm: Arc<MockLlm>) -> GenerationClient {
    GenerationClient::new(llm, ModelVariants::default())
}

fn image_attachment(len: usize) -> EncodedAttachment {
    SelectedFile::new(Some("photo.png".into()), "image/png", vec![0xAB; len])
        .unwrap()
        .encode()
        .unwrap()
}

// =========================================================================
// GenerationRequest
// =========================================================================

#[test]
fn request_rejects_empty_prompt() {
    assert_eq!(GenerationRequest::new(String::new(), None), Err(RequestError::EmptyPrompt));
    assert_eq!(GenerationRequest::new(" \n ".into(), None), Err(RequestError::EmptyPrompt));
}

#[test]
fn request_parts_text_only() {
    let request = GenerationRequest::new("prompt".into(), None).unwrap();
    assert_eq!(request.parts(), vec![Part::Text("prompt".into())]);
}

#[test]
fn request_parts_put_attachment_first() {
    let attachment = image_attachment(16);
    let request = GenerationRequest::new("prompt".into(), Some(attachment.clone())).unwrap();
    let parts = request.parts();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], attachment.to_part());
    assert_eq!(parts[1], Part::Text("prompt".into()));
}

// =========================================================================
// model selection
// =========================================================================

#[test]
fn model_for_text_only_request() {
    let c = client(Arc::new(MockLlm::new(vec![])));
    let request = GenerationRequest::new("p".into(), None).unwrap();
    assert_eq!(c.model_for(&request), "gemini-2.5-flash");
}

#[test]
fn model_for_request_with_attachment() {
    let c = client(Arc::new(MockLlm::new(vec![])));
    let request = GenerationRequest::new("p".into(), Some(image_attachment(4))).unwrap();
    assert_eq!(c.model_for(&request), "gemini-2.5-flash-image");
}

// =========================================================================
// generate
// =========================================================================

#[tokio::test]
async fn generate_returns_provider_text_unmodified() {
    let text = "  ## عنوان\n\n- نقطة  \n";
    let llm = Arc::new(MockLlm::new(vec![MockReply::Text(text.into())]));
    let result = client(llm.clone())
        .generate(&GenerationRequest::new("p".into(), None).unwrap())
        .await;
    assert_eq!(result, GenerationResult::Generated { text: text.into() });
    assert_eq!(result.text(), text);
    assert!(!result.is_fallback());
}

#[tokio::test]
async fn generate_issues_exactly_one_call_with_selected_model() {
    let llm = Arc::new(MockLlm::new(vec![]));
    let c = client(llm.clone());

    c.generate(&GenerationRequest::new("text".into(), None).unwrap()).await;
    let attachment = image_attachment(2 * 1024 * 1024);
    c.generate(&GenerationRequest::new("image".into(), Some(attachment.clone())).unwrap())
        .await;

    let calls = llm.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].model, "gemini-2.5-flash");
    assert_eq!(calls[0].parts, vec![Part::Text("text".into())]);
    assert_eq!(calls[1].model, "gemini-2.5-flash-image");
    assert!(calls[1].parts[0].is_inline_data());
    assert_eq!(calls[1].parts[1], Part::Text("image".into()));

    let Part::InlineData { mime_type, data } = &calls[1].parts[0] else {
        panic!("expected inline data first");
    };
    assert_eq!(mime_type, "image/png");
    assert_eq!(data, attachment.data());
    assert_eq!(decode(&attachment).unwrap().len(), 2 * 1024 * 1024);
}

#[tokio::test]
async fn generate_folds_provider_failure_into_fallback() {
    let llm = Arc::new(MockLlm::new(vec![MockReply::Error]));
    let result = client(llm.clone())
        .generate(&GenerationRequest::new("p".into(), None).unwrap())
        .await;
    assert_eq!(result, GenerationResult::Fallback { message: FALLBACK_MESSAGE.into() });
    assert!(result.is_fallback());
    assert_eq!(result.text(), FALLBACK_MESSAGE);
    assert_eq!(llm.calls().len(), 1);
}

#[tokio::test]
async fn generate_does_not_retry_after_failure() {
    let llm = Arc::new(MockLlm::new(vec![MockReply::Error, MockReply::Text("second".into())]));
    let result = client(llm.clone())
        .generate(&GenerationRequest::new("p".into(), None).unwrap())
        .await;
    assert!(result.is_fallback());
    assert_eq!(llm.calls().len(), 1);
}

#[test]
fn result_serializes_with_kind_tag() {
    let json = serde_json::to_value(GenerationResult::Generated { text: "x".into() }).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "generated", "text": "x" }));
}
