use planscope::{FailureKind, GeminiClient, GeminiConfig, GenerationError, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        api_key: api_key.map(str::to_string),
        model: "gemini-pro".to_string(),
        base_url: server.uri(),
    })
}

fn completion(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }]
    })
}

fn error_envelope(code: u16, message: &str, status: &str) -> serde_json::Value {
    json!({ "error": { "code": code, "message": message, "status": status } })
}

#[test_log::test(tokio::test)]
async fn test_generate_sends_instruction_and_returns_text_verbatim() {
    let server = MockServer::start().await;
    let instruction = "Provide a cost estimation for the following project: a treehouse";

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": instruction }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("## Estimate\n\n* Wood: $300\n")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server, Some("test-key"))
        .generate(instruction)
        .await
        .unwrap();
    assert_eq!(text, "## Estimate\n\n* Wood: $300\n");
}

#[tokio::test]
async fn test_missing_key_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server, None).generate("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredential));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

#[tokio::test]
async fn test_invalid_key_is_a_configuration_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_envelope(
            400,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, Some("bogus")).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Unauthorized { status: 400, .. }));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

#[tokio::test]
async fn test_forbidden_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_envelope(
            403,
            "Method doesn't allow unregistered callers.",
            "PERMISSION_DENIED",
        )))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Unauthorized { status: 403, .. }));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_envelope(
            429,
            "Resource has been exhausted",
            "RESOURCE_EXHAUSTED",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::RateLimited { ref message } if message == "Resource has been exhausted"));
    assert_eq!(err.kind(), FailureKind::Upstream);
}

#[tokio::test]
async fn test_server_error_keeps_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("x").await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Upstream { status: 503, ref message } if message == "upstream overloaded"
    ));
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
    assert_eq!(err.kind(), FailureKind::Upstream);
}

#[tokio::test]
async fn test_blocked_prompt_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": { "blockReason": "OTHER" } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Blocked { ref reason } if reason == "OTHER"));
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_failure() {
    let client = GeminiClient::new(GeminiConfig {
        api_key: Some("k".to_string()),
        model: "gemini-pro".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
    });
    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
    assert_eq!(err.kind(), FailureKind::Upstream);
}
