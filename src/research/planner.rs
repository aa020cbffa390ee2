//! Search planning.
//!
//! The planner asks the LLM collaborator for a fixed number of targeted
//! searches as strict JSON and parses them into a [`SearchPlan`]. A
//! malformed or empty plan is fatal to the run; there is no partial report
//! without a plan, and no retries happen at this layer.

use crate::llm::LLMClient;
use crate::types::{AppError, Result, SearchPlan, SearchTask};
use serde::Deserialize;
use std::sync::Arc;

const PLANNER_SYSTEM_PROMPT: &str = "You are a research planner. Given a query, come up with \
the web searches best suited to answer it. Respond with strict JSON only, no prose, matching \
this shape:\n\
{\"searches\": [{\"search_term\": \"...\", \"rationale\": \"...\"}]}\n\
Each rationale explains why that search is important to the query.";

/// Wire shape of the planner's JSON response.
#[derive(Debug, Deserialize)]
struct PlannerResponse {
    searches: Vec<SearchTask>,
}

/// Turns a free-text query into an ordered list of search tasks.
#[derive(Clone)]
pub struct SearchPlanner {
    llm: Arc<dyn LLMClient>,
    num_searches: usize,
}

impl SearchPlanner {
    /// Create a planner that requests `num_searches` searches per query.
    pub fn new(llm: Arc<dyn LLMClient>, num_searches: usize) -> Self {
        Self { llm, num_searches }
    }

    /// Plan the searches for a query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Planning`] when the collaborator fails, returns
    /// malformed JSON, or produces an empty task list.
    pub async fn plan(&self, query: &str) -> Result<SearchPlan> {
        let prompt = format!(
            "Query: {}\n\nPlan exactly {} searches.",
            query, self.num_searches
        );

        let response = self
            .llm
            .generate_with_system(PLANNER_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| AppError::Planning(e.to_string()))?;

        let parsed: PlannerResponse = serde_json::from_str(super::strip_code_fence(&response))
            .map_err(|e| AppError::Planning(format!("Malformed plan from LLM: {}", e)))?;

        if parsed.searches.is_empty() {
            return Err(AppError::Planning(
                "Planner produced an empty search plan".to_string(),
            ));
        }

        tracing::info!(
            task_count = parsed.searches.len(),
            "Search plan ready"
        );

        Ok(SearchPlan {
            tasks: parsed.searches,
        })
    }
}
