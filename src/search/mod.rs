//! Search Collaborator
//!
//! The executor dispatches each planned [`SearchTask`](crate::types::SearchTask)
//! to an implementation of [`SearchClient`]. The trait returns a plain text
//! findings summary or an error; timeouts, transport failures, and empty
//! result sets all surface as errors so the executor can record a
//! per-task `Failed` outcome without aborting sibling searches.
//!
//! [`WebSearchClient`] is the production implementation: a DuckDuckGo
//! search via daedra, with the LLM compressing the result snippets into a
//! short summary suitable for report synthesis.

/// Web search implementation backed by daedra.
pub mod web;

use crate::types::{Result, SearchTask};
use async_trait::async_trait;

pub use web::WebSearchClient;

/// External search collaborator boundary.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one search task and return a text summary of the findings.
    async fn search(&self, task: &SearchTask) -> Result<String>;
}
