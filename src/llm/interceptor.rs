//! Retrieve-only interception of the generation step.
//!
//! [`RetrieveOnlyLlm`] fulfills the full [`LanguageModel`] surface but never
//! generates: completions come back empty and `chat` returns the input
//! messages as a per-call capture. The query pipeline runs its normal prompt
//! assembly against it, and the caller reads the assembled prompt out of the
//! returned [`ChatExchange`] instead of an answer.
//!
//! One value is constructed per retrieve request. The wrapped model handle is
//! retained so the caller can swap back to real generation transparently, but
//! it is never invoked from here.

use crate::llm::client::{ChatExchange, CompletionResponse, LanguageModel, LlmMetadata};
use crate::types::{ChatMessage, GenerateOptions, Result};
use async_trait::async_trait;
use futures::{stream, Stream};
use std::sync::Arc;

pub struct RetrieveOnlyLlm {
    original: Arc<dyn LanguageModel>,
    context_window: usize,
}

impl RetrieveOnlyLlm {
    /// Wrap a real model for a single retrieve-only request.
    pub fn new(original: Arc<dyn LanguageModel>, context_window: usize) -> Self {
        Self {
            original,
            context_window,
        }
    }

    /// The wrapped model, untouched by interception.
    pub fn original(&self) -> Arc<dyn LanguageModel> {
        Arc::clone(&self.original)
    }
}

#[async_trait]
impl LanguageModel for RetrieveOnlyLlm {
    async fn complete(
        &self,
        _prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<CompletionResponse> {
        Ok(CompletionResponse {
            text: String::new(),
        })
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        _options: &GenerateOptions,
    ) -> Result<ChatExchange> {
        Ok(ChatExchange::captured(messages.to_vec()))
    }

    // The original backend leaves streaming on this path undefined; resolved
    // here as a silently empty stream so the retrieve-only path cannot fail.
    async fn stream(
        &self,
        _prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
        Ok(Box::new(stream::empty()))
    }

    fn metadata(&self) -> LlmMetadata {
        LlmMetadata {
            context_window: self.context_window,
            is_chat_model: false,
        }
    }

    fn model_name(&self) -> &str {
        self.original.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    struct StubModel;

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn complete(
            &self,
            _prompt: &str,
            _options: &GenerateOptions,
        ) -> Result<CompletionResponse> {
            Ok(CompletionResponse {
                text: "generated".to_string(),
            })
        }

        async fn chat(
            &self,
            _messages: &[ChatMessage],
            _options: &GenerateOptions,
        ) -> Result<ChatExchange> {
            Ok(ChatExchange::response(ChatMessage::assistant("generated")))
        }

        async fn stream(
            &self,
            _prompt: &str,
        ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
            Ok(Box::new(stream::empty()))
        }

        fn metadata(&self) -> LlmMetadata {
            LlmMetadata {
                context_window: 8192,
                is_chat_model: true,
            }
        }

        fn model_name(&self) -> &str {
            "stub-model"
        }
    }

    fn interceptor() -> RetrieveOnlyLlm {
        RetrieveOnlyLlm::new(Arc::new(StubModel), 4096)
    }

    #[tokio::test]
    async fn test_chat_captures_exact_input() {
        let llm = interceptor();
        let messages = vec![
            ChatMessage::system("Context information is below."),
            ChatMessage::user("What is Rust?"),
        ];

        let exchange = llm
            .chat(&messages, &GenerateOptions::default())
            .await
            .unwrap();

        assert!(exchange.message.content.is_empty());
        assert_eq!(exchange.captured, Some(messages));
    }

    #[tokio::test]
    async fn test_no_residue_across_calls() {
        let llm = interceptor();

        let first = vec![ChatMessage::user("first question")];
        let second = vec![
            ChatMessage::system("different context"),
            ChatMessage::user("second question"),
        ];

        let exchange_one = llm.chat(&first, &GenerateOptions::default()).await.unwrap();
        let exchange_two = llm
            .chat(&second, &GenerateOptions::default())
            .await
            .unwrap();

        // Each exchange holds exactly its own call's input.
        assert_eq!(exchange_one.captured, Some(first));
        assert_eq!(exchange_two.captured, Some(second));
    }

    #[tokio::test]
    async fn test_complete_is_empty_and_never_fails() {
        let llm = interceptor();
        let response = llm
            .complete("any prompt at all", &GenerateOptions::default())
            .await
            .unwrap();
        assert!(response.text.is_empty());
    }

    #[tokio::test]
    async fn test_stream_is_silently_empty() {
        let llm = interceptor();
        let mut tokens = llm.stream("prompt").await.unwrap();
        assert!(tokens.next().await.is_none());
    }

    #[test]
    fn test_metadata_reports_fixed_window() {
        let llm = interceptor();
        let metadata = llm.metadata();
        assert_eq!(metadata.context_window, 4096);
        assert!(!metadata.is_chat_model);
    }

    #[test]
    fn test_original_handle_survives_interception() {
        let original: Arc<dyn LanguageModel> = Arc::new(StubModel);
        let llm = RetrieveOnlyLlm::new(Arc::clone(&original), 4096);
        assert!(Arc::ptr_eq(&llm.original(), &original));
        assert_eq!(llm.model_name(), "stub-model");
    }
}
