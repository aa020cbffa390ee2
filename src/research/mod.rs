//! Research Orchestration Pipeline
//!
//! This module is the core of the crate: it turns a free-text query into a
//! finished research report by sequencing four external collaborators and
//! exposing the whole run as one ordered stream of progress events
//! terminating in the final report.
//!
//! # Architecture
//!
//! - [`planner::SearchPlanner`] - turns the query into an ordered search plan
//! - [`executor::SearchExecutor`] - runs the planned searches concurrently
//!   with bounded parallelism and per-task failure isolation
//! - [`writer::ReportWriter`] - synthesizes successful findings into a report
//! - [`deliverer::Deliverer`] - best-effort email delivery of the report
//! - [`orchestrator::ResearchOrchestrator`] - the forward-only state machine
//!   tying the stages together
//!
//! # Usage
//!
//! ```ignore
//! use argus::research::ResearchOrchestrator;
//! use futures::StreamExt;
//!
//! let orchestrator = ResearchOrchestrator::builder(llm, search).build();
//!
//! let mut stream = std::pin::pin!(orchestrator.run("Latest AI agent frameworks in 2025"));
//! while let Some(event) = stream.next().await {
//!     match event? {
//!         RunEvent::Progress(p) => println!("{}", p),
//!         RunEvent::FinalReport(report) => println!("{}", report.markdown_body),
//!     }
//! }
//! ```
//!
//! # Failure semantics
//!
//! Planning and writing failures are fatal and terminate the stream with an
//! error naming the stage. Individual search failures and delivery failures
//! are absorbed into the data model and never abort a run.

/// Best-effort email delivery of the finished report.
pub mod deliverer;
/// Concurrent, order-preserving execution of the search plan.
pub mod executor;
/// The run state machine and its progress stream.
pub mod orchestrator;
/// Query-to-search-plan generation.
pub mod planner;
/// Report synthesis from search findings.
pub mod writer;

pub use deliverer::Deliverer;
pub use executor::SearchExecutor;
pub use orchestrator::{ResearchOrchestrator, ResearchOrchestratorBuilder};
pub use planner::SearchPlanner;
pub use writer::{ReportDraftInput, ReportWriter};

/// Strip a markdown code fence from an LLM response, if present.
///
/// Models asked for strict JSON still frequently wrap it in ```json fences;
/// both planner and writer tolerate that before parsing.
pub(crate) fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_plain() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_with_language_tag() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_without_language_tag() {
        let fenced = "```\n[1, 2, 3]\n```";
        assert_eq!(strip_code_fence(fenced), "[1, 2, 3]");
    }
}
