use anyhow::{anyhow, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use super::base::FragmentStream;
use super::utils::{messages_to_openai_spec, openai_response_to_message, sse_fragments};
use crate::models::message::Message;

/// HTTP client for vendors exposing the OpenAI chat-completions API
pub struct ChatCompletionsClient {
    client: Client,
    host: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(host: &str, api_key: &str, model: &str) -> Result<Self> {
        if host.trim().is_empty() {
            return Err(anyhow!("Base URL must not be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self {
            client,
            host: host.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, messages: &[Message], stream: bool) -> Value {
        json!({
            "model": self.model,
            "messages": messages_to_openai_spec(messages),
            "stream": stream,
        })
    }

    async fn post(&self, payload: Value) -> Result<Response> {
        let url = format!("{}/chat/completions", self.host.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(anyhow!("Request failed: {}\nBody: {}", status, body))
            }
        }
    }

    pub async fn generate(&self, messages: &[Message]) -> Result<Message> {
        let response: Value = self.post(self.payload(messages, false)).await?.json().await?;
        openai_response_to_message(&response)
    }

    pub async fn stream(&self, messages: &[Message]) -> Result<FragmentStream> {
        let response = self.post(self.payload(messages, true)).await?;
        let model = self.model.clone();

        tracing::debug!(model = %model, "stream opened");
        Ok(
            FragmentStream::new(sse_fragments(response.bytes_stream())).on_release(move || {
                tracing::debug!(model = %model, "stream released");
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server(response: ResponseTemplate) -> (MockServer, ChatCompletionsClient) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test_api_key"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let client =
            ChatCompletionsClient::new(&mock_server.uri(), "test_api_key", "qwen-plus").unwrap();
        (mock_server, client)
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("You are a helpful assistant."),
            Message::user("Hello?"),
        ]
    }

    #[tokio::test]
    async fn test_generate_basic() -> Result<()> {
        let response_body = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello! How can I assist you today?"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 12,
                "completion_tokens": 15,
                "total_tokens": 27
            }
        });

        let (_server, client) =
            setup_mock_server(ResponseTemplate::new(200).set_body_json(response_body)).await;

        let message = client.generate(&conversation()).await?;
        assert_eq!(
            message,
            Message::assistant("Hello! How can I assist you today?")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_sends_model_and_messages() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "qwen-plus",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Hello?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ChatCompletionsClient::new(
            &format!("{}/", mock_server.uri()),
            "test_api_key",
            "qwen-plus",
        )?;
        assert_eq!(client.generate(&conversation()).await?.content, "ok");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_client_error_includes_body() {
        let (_server, client) = setup_mock_server(
            ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid api key\"}"),
        )
        .await;

        let err = client.generate(&conversation()).await.unwrap_err();
        let err = err.to_string();
        assert!(err.contains("401"));
        assert!(err.contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let (_server, client) = setup_mock_server(ResponseTemplate::new(503)).await;

        let err = client.generate(&conversation()).await.unwrap_err();
        assert!(err.to_string().starts_with("Server error"));
    }

    #[tokio::test]
    async fn test_stream_yields_fragments() -> Result<()> {
        let body = concat!(
            "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        );
        let (_server, client) = setup_mock_server(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream"),
        )
        .await;

        let mut stream = client.stream(&conversation()).await?;
        let mut contents = Vec::new();
        let mut terminal = false;
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            contents.push(fragment.content);
            terminal = fragment.terminal;
        }

        assert_eq!(contents, vec!["Hel", "lo"]);
        assert!(terminal);
        assert!(stream.is_closed());
        Ok(())
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(ChatCompletionsClient::new("  ", "key", "qwen-plus").is_err());
    }
}
