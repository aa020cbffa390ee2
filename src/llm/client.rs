//! LLM client abstraction.
//!
//! The research pipeline treats the language model as an external
//! collaborator behind a narrow trait, so tests can substitute a mock and
//! the provider can be swapped without touching pipeline code. Only
//! one-shot completions are needed; there is no conversation state.

use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One-shot completion interface to a language model.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Complete a bare user prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Complete a user prompt under a steering system prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// The model identifier this client speaks to, for logging.
    fn model_name(&self) -> &str;
}

/// Which backend to construct a client for.
///
/// A single variant today; the enum keeps provider selection a
/// configuration concern rather than a type parameter threaded through
/// the pipeline.
#[derive(Debug, Clone)]
pub enum Provider {
    /// An OpenAI-compatible chat completion endpoint.
    OpenAI {
        /// API key for the endpoint.
        api_key: String,
        /// Base URL, e.g. `https://api.openai.com/v1`.
        api_base: String,
        /// Model identifier, e.g. `gpt-4o-mini`.
        model: String,
    },
}

impl Provider {
    /// Construct a shareable client for this provider.
    pub fn create_client(&self) -> Arc<dyn LLMClient> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Arc::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            )),
        }
    }

    /// Human-readable provider name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
        }
    }
}
