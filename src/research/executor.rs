//! Concurrent search execution.
//!
//! Each planned search is dispatched as an independent tokio task; a
//! semaphore caps how many are in flight at once so external rate limits
//! are respected. Outcomes are reassembled into task-submission order
//! regardless of completion order, and a single task's failure never
//! aborts its siblings or the run. Escalating an all-failed result to a
//! fatal error is the orchestrator's decision, not the executor's.

use crate::search::SearchClient;
use crate::types::{SearchOutcome, SearchPlan};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default cap on simultaneously in-flight searches.
pub const DEFAULT_MAX_CONCURRENT_SEARCHES: usize = 5;

/// Runs a search plan with bounded parallelism and per-task failure
/// isolation.
#[derive(Clone)]
pub struct SearchExecutor {
    search: Arc<dyn SearchClient>,
    max_concurrency: usize,
}

impl SearchExecutor {
    /// Create an executor over the given search collaborator.
    pub fn new(search: Arc<dyn SearchClient>, max_concurrency: usize) -> Self {
        Self {
            search,
            // A zero bound would deadlock the semaphore.
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Execute every task in the plan, returning exactly one outcome per
    /// task in task-index order.
    ///
    /// Never fails at the run level: collaborator errors become
    /// [`SearchOutcome::Failed`] entries. Dropping the returned future
    /// aborts in-flight searches.
    pub async fn execute(&self, plan: &SearchPlan) -> Vec<SearchOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut set: JoinSet<(usize, SearchOutcome)> = JoinSet::new();

        for (index, task) in plan.tasks.iter().cloned().enumerate() {
            let search = Arc::clone(&self.search);
            let semaphore = Arc::clone(&semaphore);

            set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            index,
                            SearchOutcome::Failed {
                                search_term: task.search_term,
                                reason: "concurrency limiter closed".to_string(),
                            },
                        );
                    }
                };

                let outcome = match search.search(&task).await {
                    Ok(summary) => SearchOutcome::Success {
                        search_term: task.search_term,
                        summary,
                    },
                    Err(e) => {
                        tracing::warn!(index, reason = %e, "Search task failed");
                        SearchOutcome::Failed {
                            search_term: task.search_term,
                            reason: e.to_string(),
                        }
                    }
                };

                (index, outcome)
            });
        }

        // Completion order is arbitrary; slot outcomes back by task index.
        let mut slots: Vec<Option<SearchOutcome>> = (0..plan.len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::warn!(error = %e, "Search task could not be joined"),
            }
        }

        // A task that panicked or was aborted left its slot empty; the
        // one-outcome-per-task contract still has to hold.
        plan.tasks
            .iter()
            .zip(slots)
            .map(|(task, slot)| {
                slot.unwrap_or_else(|| SearchOutcome::Failed {
                    search_term: task.search_term.clone(),
                    reason: "search task aborted".to_string(),
                })
            })
            .collect()
    }
}
