//! Concurrency behavior of the search executor.

mod common;

use argus::research::SearchExecutor;
use argus::search::SearchClient;
use argus::types::{AppError, Result, SearchOutcome, SearchPlan, SearchTask};
use async_trait::async_trait;
use common::mocks::MockSearch;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn plan_of(n: usize) -> SearchPlan {
    SearchPlan {
        tasks: (0..n)
            .map(|i| SearchTask {
                search_term: format!("t{}", i),
                rationale: format!("r{}", i),
            })
            .collect(),
    }
}

/// Tracks how many searches run at once and reports the high-water mark.
struct ConcurrencyProbe {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyProbe {
    fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for ConcurrencyProbe {
    async fn search(&self, task: &SearchTask) -> Result<String> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("summary for {}", task.search_term))
    }
}

/// Finishes later-numbered tasks first so completion order inverts
/// submission order.
struct ReversedLatency;

#[async_trait]
impl SearchClient for ReversedLatency {
    async fn search(&self, task: &SearchTask) -> Result<String> {
        let index: u64 = task.search_term.trim_start_matches('t').parse().unwrap();
        tokio::time::sleep(Duration::from_millis(60 - index * 10)).await;
        Ok(format!("summary for {}", task.search_term))
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[tokio::test]
async fn concurrency_never_exceeds_the_bound(#[case] bound: usize) {
    let probe = Arc::new(ConcurrencyProbe::new());
    let executor = SearchExecutor::new(probe.clone(), bound);

    let outcomes = executor.execute(&plan_of(8)).await;

    assert_eq!(outcomes.len(), 8);
    assert!(outcomes.iter().all(SearchOutcome::is_success));
    assert!(
        probe.peak() <= bound,
        "observed {} concurrent searches with bound {}",
        probe.peak(),
        bound
    );
}

#[tokio::test]
async fn outcomes_follow_plan_order_not_completion_order() {
    let executor = SearchExecutor::new(Arc::new(ReversedLatency), 5);

    let outcomes = executor.execute(&plan_of(5)).await;

    let terms: Vec<&str> = outcomes.iter().map(|o| o.search_term()).collect();
    assert_eq!(terms, vec!["t0", "t1", "t2", "t3", "t4"]);
}

#[tokio::test]
async fn failed_tasks_keep_their_slot() {
    let search = Arc::new(MockSearch::new().failing_on("t1").failing_on("t3"));
    let executor = SearchExecutor::new(search, 5);

    let outcomes = executor.execute(&plan_of(5)).await;

    assert_eq!(outcomes.len(), 5);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.search_term(), format!("t{}", i));
        match outcome {
            SearchOutcome::Failed { .. } => assert!(i == 1 || i == 3),
            SearchOutcome::Success { .. } => assert!(i != 1 && i != 3),
        }
    }
}

#[tokio::test]
async fn all_failures_still_return_one_outcome_per_task() {
    let search = Arc::new(MockSearch::failing_always(&["t0", "t1", "t2"]));
    let executor = SearchExecutor::new(search, 5);

    let outcomes = executor.execute(&plan_of(3)).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| !o.is_success()));
    for outcome in &outcomes {
        match outcome {
            SearchOutcome::Failed { reason, .. } => assert!(!reason.is_empty()),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn empty_plan_yields_no_outcomes() {
    let executor = SearchExecutor::new(Arc::new(MockSearch::new()), 5);
    let outcomes = executor.execute(&plan_of(0)).await;
    assert!(outcomes.is_empty());
}

/// Error text from the client survives into the outcome so operators can
/// see why a task failed.
#[tokio::test]
async fn failure_reason_carries_client_error() {
    struct NamedFailure;

    #[async_trait]
    impl SearchClient for NamedFailure {
        async fn search(&self, _task: &SearchTask) -> Result<String> {
            Err(AppError::Search("upstream returned 429".to_string()))
        }
    }

    let executor = SearchExecutor::new(Arc::new(NamedFailure), 1);
    let outcomes = executor.execute(&plan_of(1)).await;

    match &outcomes[0] {
        SearchOutcome::Failed { reason, .. } => assert!(reason.contains("429")),
        other => panic!("expected failure, got {:?}", other),
    }
}
