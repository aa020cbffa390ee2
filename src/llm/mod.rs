//! LLM Collaborator Clients
//!
//! The planning collaborator, the writing collaborator, and the
//! summarization step of web search all speak to a language model through
//! the [`LLMClient`] trait defined here. The pipeline only needs one-shot
//! completions, so the trait is deliberately small: no tool calling, no
//! conversation history, no token streaming.
//!
//! # Example
//!
//! ```ignore
//! use argus::llm::{LLMClient, Provider};
//!
//! let provider = Provider::OpenAI {
//!     api_key: "sk-...".to_string(),
//!     api_base: "https://api.openai.com/v1".to_string(),
//!     model: "gpt-4o-mini".to_string(),
//! };
//! let client = provider.create_client();
//! let answer = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// OpenAI-compatible client implementation.
pub mod openai;

pub use client::{LLMClient, Provider};
pub use openai::OpenAIClient;
