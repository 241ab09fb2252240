//! Language model abstraction.
//!
//! All generation backends implement [`LanguageModel`], allowing the query
//! pipeline to swap between a real inference client and the retrieve-only
//! interceptor without changing orchestration code.

use crate::types::{ChatMessage, GenerateOptions, Result};
use async_trait::async_trait;
use futures::Stream;

/// Generic language model trait for backend abstraction.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion from a raw prompt.
    async fn complete(&self, prompt: &str, options: &GenerateOptions) -> Result<CompletionResponse>;

    /// Generate a chat response from a message sequence.
    ///
    /// The returned [`ChatExchange`] carries the response message and, for
    /// capturing implementations, the input messages of this call.
    async fn chat(&self, messages: &[ChatMessage], options: &GenerateOptions)
        -> Result<ChatExchange>;

    /// Stream a completion token by token.
    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>>;

    /// Static properties of this model.
    fn metadata(&self) -> LlmMetadata;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Response from a completion request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The text content of the response. Empty when generation was suppressed.
    pub text: String,
}

/// Result of a single chat call.
///
/// Capturing implementations return the full input sequence in `captured`;
/// real backends return `None`. The capture is owned by this value, so each
/// call's result is isolated from every other call.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    /// The response message. Empty content when generation was suppressed.
    pub message: ChatMessage,
    /// The exact input messages of this call, if the backend captures them.
    pub captured: Option<Vec<ChatMessage>>,
}

impl ChatExchange {
    /// A plain generated response with no capture.
    pub fn response(message: ChatMessage) -> Self {
        Self {
            message,
            captured: None,
        }
    }

    /// A suppressed response carrying the captured input.
    pub fn captured(messages: Vec<ChatMessage>) -> Self {
        Self {
            message: ChatMessage::assistant(""),
            captured: Some(messages),
        }
    }
}

/// Static model properties reported to the hosting pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LlmMetadata {
    /// Maximum context size the model accepts, in tokens.
    pub context_window: usize,
    /// Whether the backend is a chat-tuned model.
    pub is_chat_model: bool,
}
