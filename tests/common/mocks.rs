//! Mock implementations for testing.
//!
//! Provides a mock language model and state builders that can be used across
//! different test files without duplication.

use async_trait::async_trait;
use futures::{stream, Stream};
use retrieva::llm::client::{ChatExchange, CompletionResponse, LlmMetadata};
use retrieva::types::{AppError, ChatMessage, GenerateOptions, Result};
use retrieva::{AppState, Config, LanguageModel};
use std::sync::Arc;

/// Mock language model with a canned response.
///
/// Useful for exercising the query pipeline without an inference backend.
#[derive(Clone)]
pub struct MockLanguageModel {
    response: String,
    should_fail: bool,
}

impl MockLanguageModel {
    /// Create a mock that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
        }
    }

    /// Create a mock that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(
        &self,
        _prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<CompletionResponse> {
        if self.should_fail {
            return Err(AppError::Llm("Mock LLM failure".to_string()));
        }
        Ok(CompletionResponse {
            text: self.response.clone(),
        })
    }

    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _options: &GenerateOptions,
    ) -> Result<ChatExchange> {
        if self.should_fail {
            return Err(AppError::Llm("Mock LLM failure".to_string()));
        }
        Ok(ChatExchange::response(ChatMessage::assistant(
            self.response.clone(),
        )))
    }

    async fn stream(
        &self,
        _prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
        if self.should_fail {
            return Err(AppError::Llm("Mock LLM failure".to_string()));
        }
        Ok(Box::new(stream::iter(vec![Ok(self.response.clone())])))
    }

    fn metadata(&self) -> LlmMetadata {
        LlmMetadata {
            context_window: 4096,
            is_chat_model: true,
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Application state wired to the hashed embedder and a canned mock model.
pub fn test_state() -> AppState {
    AppState::with_model(Config::default(), Arc::new(MockLanguageModel::new("mock answer")))
        .expect("Failed to build test state")
}

/// Application state whose model always fails.
pub fn failing_model_state() -> AppState {
    AppState::with_model(Config::default(), Arc::new(MockLanguageModel::failing()))
        .expect("Failed to build test state")
}
