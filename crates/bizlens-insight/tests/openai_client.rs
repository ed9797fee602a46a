//! Integration tests for `OpenAiClient` using wiremock HTTP mocks.

use bizlens_insight::{InsightError, OpenAiClient, TextGenerator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OpenAiClient {
    OpenAiClient::with_base_url("test-key", "gpt-4o-mini", 10, "bizlens-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn chat_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"summary\": \"ok\"}")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .chat("system prompt", "user prompt", 500)
        .await
        .expect("chat should succeed");
    assert_eq!(reply, "{\"summary\": \"ok\"}");
}

#[tokio::test]
async fn chat_sends_both_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                { "role": "system", "content": "be helpful" },
                { "role": "user", "content": "analyze this" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("fine")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .chat("be helpful", "analyze this", 500)
        .await
        .expect("chat should succeed");
    assert_eq!(reply, "fine");
}

#[tokio::test]
async fn empty_choices_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.chat("s", "u", 500).await.unwrap_err();
    assert!(matches!(err, InsightError::Generation(_)), "got: {err:?}");
}

#[tokio::test]
async fn http_failure_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.chat("s", "u", 500).await.unwrap_err();
    assert!(matches!(err, InsightError::Http(_)), "got: {err:?}");
}

#[tokio::test]
async fn generate_trait_delegates_to_chat() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("via trait")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let generator: &dyn TextGenerator = &client;
    let reply = generator
        .generate("s", "u", 600)
        .await
        .expect("generate should succeed");
    assert_eq!(reply, "via trait");
}
