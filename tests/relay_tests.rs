use physical_ai_hub::error::AppError;
use physical_ai_hub::message::{ChatContext, ChatRequest};
use physical_ai_hub::services::gemini::{GeminiClient, GenerationConfig, UpstreamError};
use physical_ai_hub::services::relay::ChatRelay;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use reqwest::Url;
use std::time::Duration;
use tokio::net::TcpListener;

fn relay(base: &str, timeout: Duration) -> ChatRelay {
    let client = GeminiClient::new(
        Url::parse(base).unwrap(),
        "gemini-2.0-flash",
        GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 1024,
        },
        timeout,
    )
    .unwrap();
    ChatRelay::new(client, Some("test-key".to_string()))
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: Some(message.to_string()),
        context: Some(ChatContext {
            active_tab: Some("matrix".to_string()),
            ..Default::default()
        }),
    }
}

#[tokio::test]
async fn test_stalled_upstream_times_out() {
    // Accepts connections and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let relay = relay(&format!("http://{addr}/v1beta"), Duration::from_millis(200));
    let err = relay.handle(request("hello")).await.unwrap_err();

    assert!(matches!(err, AppError::Downstream(UpstreamError::Timeout)), "{err:?}");
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let relay = relay(&format!("http://{addr}/v1beta"), Duration::from_secs(5));
    let err = relay.handle(request("hello")).await.unwrap_err();

    assert!(matches!(err, AppError::Downstream(UpstreamError::Transport(_))), "{err:?}");
    assert_eq!(err.client_message(), "Internal server error");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_non_json_success_body_is_internal_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body("definitely not json")
        .create_async()
        .await;

    let relay = relay(&format!("{}/v1beta", server.url()), Duration::from_secs(5));
    let err = relay.handle(request("hello")).await.unwrap_err();

    assert!(matches!(err, AppError::Downstream(UpstreamError::Decode(_))), "{err:?}");
    assert_eq!(err.client_message(), "Internal server error");
}

#[tokio::test]
async fn test_identical_requests_send_identical_prompts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_body(mockito::Matcher::Regex(
            "Currently viewing: matrix tab".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"same"}]}}]}"#)
        .expect(2)
        .create_async()
        .await;

    let relay = relay(&format!("{}/v1beta", server.url()), Duration::from_secs(5));
    let first = relay.handle(request("  hello  ")).await.unwrap();
    let second = relay.handle(request("  hello  ")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.response, "same");
    mock.assert_async().await;
}
