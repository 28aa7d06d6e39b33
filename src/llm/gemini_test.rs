use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 45, "totalTokenCount": 165 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn request_keeps_part_order_and_wire_names() {
    let parts = vec![
        Part::InlineData { mime_type: "image/png".into(), data: "iVBORw0=".into() },
        Part::Text("describe".into()),
    ];
    let json = serde_json::to_value(build_request(&parts)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0=" } },
                    { "text": "describe" }
                ]
            }]
        })
    );
}

#[test]
fn request_text_only() {
    let parts = vec![Part::Text("hello".into())];
    let json = serde_json::to_value(build_request(&parts)).unwrap();
    assert_eq!(json["contents"][0]["parts"], serde_json::json!([{ "text": "hello" }]));
}

#[test]
fn endpoint_includes_model_and_method() {
    assert_eq!(
        endpoint("https://generativelanguage.googleapis.com/v1beta", "gemini-2.5-flash"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "# اختبار" }]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "# اختبار");
    assert_eq!(resp.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 45);
}

#[test]
fn parse_concatenates_text_parts_unmodified() {
    let json = make_response(serde_json::json!([{ "text": "part one, " }, { "text": "part two\n" }]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "part one, part two\n");
}

#[test]
fn parse_skips_thought_and_non_text_parts() {
    let json = make_response(serde_json::json!([
        { "text": "thinking...", "thought": true },
        { "inlineData": { "mimeType": "image/png", "data": "AA==" } },
        { "text": "answer" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "answer");
}

#[test]
fn parse_missing_usage_defaults_to_zero() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
    })
    .to_string();
    let resp = parse_response(&json).unwrap();
    assert_eq!((resp.input_tokens, resp.output_tokens), (0, 0));
    assert!(resp.finish_reason.is_none());
}

#[test]
fn parse_blocked_prompt_is_empty_response() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse { ref reason } if reason == "SAFETY"));
}

#[test]
fn parse_candidate_without_text_is_empty_response() {
    let json = serde_json::json!({
        "candidates": [{ "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse { ref reason } if reason == "MAX_TOKENS"));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}
