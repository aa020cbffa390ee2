//! Web search via daedra (DuckDuckGo backend) with LLM summarization.

use crate::llm::LLMClient;
use crate::search::SearchClient;
use crate::types::{AppError, Result, SearchTask};
use async_trait::async_trait;
use std::sync::Arc;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a research assistant. Given a search term and raw \
web search results, produce a concise summary of the findings in 2-3 paragraphs, under 300 \
words. Capture the main points; ignore fluff and navigation text. Write tersely, this is for \
someone synthesizing a report, so complete sentences and grammar are not required. Do not \
include any commentary other than the summary itself.";

/// Web search collaborator: daedra search plus an LLM compression pass
/// over the result snippets.
pub struct WebSearchClient {
    llm: Arc<dyn LLMClient>,
    num_results: usize,
}

impl WebSearchClient {
    /// Create a web search client that summarizes with the given LLM.
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            num_results: 8,
        }
    }

    /// Override how many raw results are fetched per search.
    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    /// Fetch raw results and format them as a snippet block for the LLM.
    async fn fetch_snippets(&self, term: &str) -> Result<String> {
        let search_args = daedra::SearchArgs {
            query: term.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: self.num_results,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&search_args)
            .await
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        if response.data.is_empty() {
            return Err(AppError::Search(format!(
                "No results for search term '{}'",
                term
            )));
        }

        let snippets = response
            .data
            .iter()
            .map(|r| format!("- {} ({})\n  {}", r.title, r.url, r.description))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(snippets)
    }
}

#[async_trait]
impl SearchClient for WebSearchClient {
    async fn search(&self, task: &SearchTask) -> Result<String> {
        let snippets = self.fetch_snippets(&task.search_term).await?;

        tracing::debug!(
            search_term = %task.search_term,
            "Summarizing web results with {}",
            self.llm.model_name()
        );

        let prompt = format!(
            "Search term: {}\nReason for searching: {}\n\nResults:\n{}",
            task.search_term, task.rationale, snippets
        );

        let summary = self
            .llm
            .generate_with_system(SUMMARY_SYSTEM_PROMPT, &prompt)
            .await?;

        if summary.trim().is_empty() {
            return Err(AppError::Search(format!(
                "Empty summary for search term '{}'",
                task.search_term
            )));
        }

        Ok(summary)
    }
}
