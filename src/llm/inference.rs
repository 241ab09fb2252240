//! Client for an OpenAI-compatible chat-completions endpoint.
//!
//! The inference backend (e.g. a vLLM server) is an external collaborator;
//! this client wraps its `/v1/chat/completions` wire format and surfaces
//! failures as [`AppError::Llm`].

use crate::llm::client::{ChatExchange, CompletionResponse, LanguageModel, LlmMetadata};
use crate::types::{AppError, ChatMessage, GenerateOptions, Result};
use crate::utils::config::LlmConfig;
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::Deserialize;

pub struct InferenceClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    context_window: usize,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl InferenceClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.inference_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            context_window: config.context_window,
        }
    }

    fn request_body(
        &self,
        messages: &[ChatMessage],
        options: &GenerateOptions,
        streaming: bool,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if streaming {
            body["stream"] = serde_json::json!(true);
        }
        body
    }

    async fn post(&self, body: &serde_json::Value) -> Result<reqwest::Response> {
        let mut request = self.http.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Inference request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Inference backend returned {}: {}",
                status, detail
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LanguageModel for InferenceClient {
    async fn complete(&self, prompt: &str, options: &GenerateOptions) -> Result<CompletionResponse> {
        let messages = vec![ChatMessage::user(prompt)];
        let exchange = self.chat(&messages, options).await?;
        Ok(CompletionResponse {
            text: exchange.message.content,
        })
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerateOptions,
    ) -> Result<ChatExchange> {
        let body = self.request_body(messages, options, false);
        let response = self.post(&body).await?;

        let reply: ChatCompletionReply = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Invalid inference response: {}", e)))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Llm("No choices in inference response".to_string()))?;

        Ok(ChatExchange::response(ChatMessage::assistant(content)))
    }

    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
        let messages = vec![ChatMessage::user(prompt)];
        let body = self.request_body(&messages, &GenerateOptions::default(), true);
        let response = self.post(&body).await?;
        let mut bytes = response.bytes_stream();

        // Server-sent events: one "data: {json}" line per token delta,
        // terminated by "data: [DONE]".
        let tokens = stream! {
            let mut buffer = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(AppError::Llm(format!("Inference stream failed: {}", e)));
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data == "[DONE]" {
                        return;
                    }
                    if let Ok(event) = serde_json::from_str::<serde_json::Value>(data) {
                        if let Some(delta) = event["choices"][0]["delta"]["content"].as_str() {
                            yield Ok(delta.to_string());
                        }
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(tokens)))
    }

    fn metadata(&self) -> LlmMetadata {
        LlmMetadata {
            context_window: self.context_window,
            is_chat_model: true,
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(url: String) -> LlmConfig {
        LlmConfig {
            inference_url: url,
            model: "test-model".to_string(),
            api_key: None,
            context_window: 4096,
        }
    }

    #[tokio::test]
    async fn test_chat_parses_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Paris"}}]
            })))
            .mount(&server)
            .await;

        let client = InferenceClient::new(&test_config(format!(
            "{}/v1/chat/completions",
            server.uri()
        )));
        let messages = vec![ChatMessage::user("Capital of France?")];
        let exchange = client
            .chat(&messages, &GenerateOptions::default())
            .await
            .unwrap();

        assert_eq!(exchange.message.content, "Paris");
        assert!(exchange.captured.is_none());
    }

    #[tokio::test]
    async fn test_backend_error_surfaces_as_llm_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = InferenceClient::new(&test_config(format!(
            "{}/v1/chat/completions",
            server.uri()
        )));
        let result = client
            .complete("hello", &GenerateOptions::default())
            .await;

        match result {
            Err(AppError::Llm(msg)) => assert!(msg.contains("500")),
            other => panic!("Expected LLM error, got {:?}", other.map(|r| r.text)),
        }
    }

    #[tokio::test]
    async fn test_stream_yields_deltas_until_done() {
        let server = MockServer::start().await;
        let sse = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\
                   data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\
                   data: [DONE]\n";
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sse))
            .mount(&server)
            .await;

        let client = InferenceClient::new(&test_config(format!(
            "{}/v1/chat/completions",
            server.uri()
        )));
        let mut tokens = client.stream("hi").await.unwrap();

        let mut collected = String::new();
        while let Some(token) = tokens.next().await {
            collected.push_str(&token.unwrap());
        }
        assert_eq!(collected, "Hello");
    }
}
