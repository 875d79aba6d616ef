//! Tests for [`openai_client::OpenAIClient::chat_completion`] against a local mockito server
//! speaking the chat-completions protocol.

use openai_client::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, OpenAIClient};

fn user_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()
        .unwrap()
        .into()
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
    })
    .to_string()
}

/// **Test: The first choice's content is returned as-is.**
#[tokio::test]
async fn chat_completion_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test-key-123456")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(" hello! "))
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let reply = client
        .chat_completion("test-model", vec![user_message("hi")])
        .await
        .unwrap();

    assert_eq!(reply, " hello! ");
    mock.assert_async().await;
}

/// **Test: An API error (401) surfaces as Err.**
#[tokio::test]
async fn chat_completion_api_error_is_err() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("bad".to_string(), server.url());
    let result = client.chat_completion("test-model", vec![user_message("hi")]).await;

    assert!(result.is_err());
}

/// **Test: A response with no choices is an error.**
#[tokio::test]
async fn chat_completion_without_choices_is_err() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "id": "chatcmpl-2",
                "object": "chat.completion",
                "created": 1700000000,
                "model": "test-model",
                "choices": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test".to_string(), server.url());
    let err = client
        .chat_completion("test-model", vec![user_message("hi")])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No choices"));
}
