//! End-to-end relay tests against a mock chat completions endpoint.

use futures::StreamExt;
use nonempty::NonEmpty;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orask::client::{ClientError, FragmentStream, StreamingClient};
use orask::config::{Config, SecretString};
use orask::model::Message;
use orask::providers::OpenRouterClient;

fn test_config(base_url: &str) -> Config {
    Config {
        api_key: SecretString::new("test-key".to_string()),
        model: None,
        base_url: Some(base_url.to_string()),
        system: None,
        extra_headers: None,
    }
}

async fn collect_fragments(mut stream: FragmentStream) -> Vec<String> {
    let mut fragments = Vec::new();
    while let Some(fragment) = stream.next().await {
        fragments.push(fragment.expect("stream should not error"));
    }
    fragments
}

const SSE_BODY: &str = "\
: keep-alive comment\n\
\n\
event: message\n\
data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\
\n\
data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\
\n\
data: not-json\n\
data:\n\
data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n\
\n\
data: [DONE]\n";

#[tokio::test]
async fn relays_fragments_in_arrival_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SSE_BODY, "text/event-stream"))
        .mount(&server)
        .await;

    let client = OpenRouterClient::new(test_config(&server.uri()));
    let stream = client
        .chat_stream(NonEmpty::new(Message::user("hello")))
        .await
        .expect("request should succeed");

    assert_eq!(collect_fragments(stream).await, vec!["Hi", " there"]);
}

#[tokio::test]
async fn sends_bearer_auth_stream_flag_and_default_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "text/event-stream"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-4o-mini",
            "stream": true,
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: [DONE]\n", "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::new(test_config(&server.uri()));
    let stream = client
        .chat_stream(NonEmpty::new(Message::user("hello")))
        .await
        .expect("request should succeed");

    assert!(collect_fragments(stream).await.is_empty());
}

#[tokio::test]
async fn configured_model_and_system_message_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "anthropic/claude-3.5-haiku",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: [DONE]\n", "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.model = Some("anthropic/claude-3.5-haiku".to_string());
    config.system = Some("be brief".to_string());

    let client = OpenRouterClient::new(config);
    let messages = NonEmpty::from((Message::system("be brief"), vec![Message::user("hi")]));
    let stream = client
        .chat_stream(messages)
        .await
        .expect("request should succeed");

    assert!(collect_fragments(stream).await.is_empty());
}

#[tokio::test]
async fn attribution_headers_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("http-referer", "https://example.com"))
        .and(header("x-title", "orask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: [DONE]\n", "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.extra_headers = Some(
        [
            ("HTTP-Referer".to_string(), "https://example.com".to_string()),
            ("X-Title".to_string(), "orask".to_string()),
        ]
        .into_iter()
        .collect(),
    );

    let client = OpenRouterClient::new(config);
    let stream = client
        .chat_stream(NonEmpty::new(Message::user("hello")))
        .await
        .expect("request should succeed");

    assert!(collect_fragments(stream).await.is_empty());
}

#[tokio::test]
async fn non_success_status_is_a_fatal_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid api key\"}"),
        )
        .mount(&server)
        .await;

    let client = OpenRouterClient::new(test_config(&server.uri()));
    let result = client
        .chat_stream(NonEmpty::new(Message::user("hello")))
        .await;

    let err = match result {
        Err(err) => err,
        Ok(_) => panic!("expected an error for a 401 response"),
    };
    assert!(matches!(err, ClientError::Api { .. }));

    let message = err.to_string();
    assert!(message.contains("401"), "missing status code: {message}");
    assert!(
        message.contains("invalid api key"),
        "missing error body: {message}"
    );
}
