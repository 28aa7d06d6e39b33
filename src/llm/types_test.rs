use super::*;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_empty_response() {
    let err = LlmError::EmptyResponse { reason: "SAFETY".into() };
    assert_eq!(err.error_code(), "E_EMPTY_RESPONSE");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: "quota".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: "unavailable".into() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad request".into() }.retryable());
    assert!(!LlmError::ApiResponse { status: 403, body: "forbidden".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::EmptyResponse { reason: "SAFETY".into() }.retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_missing_api_key_names_the_variable() {
    let err = LlmError::MissingApiKey { var: "API_KEY".into() };
    assert!(err.to_string().contains("API_KEY"));
}

// =============================================================================
// Part
// =============================================================================

#[test]
fn part_kind_predicate() {
    assert!(Part::InlineData { mime_type: "image/png".into(), data: "AA==".into() }.is_inline_data());
    assert!(!Part::Text("hi".into()).is_inline_data());
}
