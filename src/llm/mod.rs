//! Language model clients and abstractions.
//!
//! This module provides a unified interface for the generation step of the
//! query pipeline. Two implementations exist:
//!
//! - [`InferenceClient`] - talks to an OpenAI-compatible chat-completions
//!   endpoint (e.g. a vLLM server)
//! - [`RetrieveOnlyLlm`] - a stand-in that fulfills the same interface but
//!   suppresses generation, capturing the assembled prompt instead. Used by
//!   the retrieve-only query path.
//!
//! # Capture semantics
//!
//! `chat` returns a [`ChatExchange`] carrying both the response message and,
//! for the interceptor, the exact input messages of that call. Captures are
//! per-call values, never shared state, so concurrent requests cannot observe
//! each other's prompts.

/// Core language model trait and response types.
pub mod client;
/// OpenAI-compatible inference client.
pub mod inference;
/// Retrieve-only interceptor.
pub mod interceptor;

pub use client::{ChatExchange, CompletionResponse, LanguageModel, LlmMetadata};
pub use inference::InferenceClient;
pub use interceptor::RetrieveOnlyLlm;
