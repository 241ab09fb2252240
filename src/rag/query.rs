//! Query pipeline: prompt assembly, generation, and retrieve-only capture.
//!
//! Both API paths share the same retrieval and prompt assembly. They differ
//! only in the model the assembled prompt is handed to: `/query` uses the
//! real inference client, `/retrieve` wraps it in a fresh
//! [`RetrieveOnlyLlm`] so the prompt comes back captured instead of answered.

use crate::llm::{LanguageModel, RetrieveOnlyLlm};
use crate::rag::handler::VectorStoreHandler;
use crate::types::{
    CapturedQuery, ChatMessage, GenerateOptions, NodeResult, QueryRequest, QueryResponse, Result,
    RetrieveRequest,
};
use std::sync::Arc;

pub struct QueryEngine {
    handler: Arc<VectorStoreHandler>,
    model: Arc<dyn LanguageModel>,
    context_window: usize,
}

impl QueryEngine {
    pub fn new(
        handler: Arc<VectorStoreHandler>,
        model: Arc<dyn LanguageModel>,
        context_window: usize,
    ) -> Self {
        Self {
            handler,
            model,
            context_window,
        }
    }

    /// Render retrieved nodes and the user query as chat messages.
    fn build_prompt(query: &str, results: &[NodeResult]) -> Vec<ChatMessage> {
        let context = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let system = format!(
            "Context information is below.\n\
             ---------------------\n\
             {}\n\
             ---------------------\n\
             Given the context information and not prior knowledge, answer the query.",
            context
        );

        vec![ChatMessage::system(system), ChatMessage::user(query)]
    }

    /// Answer a query with retrieved context.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let retrieved = self
            .handler
            .retrieve(&request.index_name, &request.query, request.max_node_count)
            .await?;

        let messages = Self::build_prompt(&request.query, &retrieved.results);
        let exchange = self.model.chat(&messages, &request.options).await?;

        Ok(QueryResponse {
            answer: exchange.message.content,
            source_nodes: retrieved.results,
        })
    }

    /// Run the query pipeline with generation suppressed.
    ///
    /// A fresh interceptor wraps the real model for this call only; the
    /// assembled prompt travels back in the per-call exchange, so concurrent
    /// retrieves never observe each other's prompts.
    pub async fn retrieve(&self, request: &RetrieveRequest) -> Result<CapturedQuery> {
        let retrieved = self
            .handler
            .retrieve(&request.index_name, &request.query, request.max_node_count)
            .await?;

        let messages = Self::build_prompt(&request.query, &retrieved.results);

        let interceptor = RetrieveOnlyLlm::new(Arc::clone(&self.model), self.context_window);
        let exchange = interceptor
            .chat(&messages, &GenerateOptions::default())
            .await?;
        let messages = exchange.captured.unwrap_or(messages);

        Ok(CapturedQuery {
            query: retrieved.query,
            messages,
            results: retrieved.results,
            count: retrieved.count,
        })
    }
}
