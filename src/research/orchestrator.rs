//! The research run state machine.
//!
//! One call to [`ResearchOrchestrator::run`] is one run:
//! `Planning -> Searching -> Writing -> Delivering -> Done`, strictly
//! forward, no re-entry. Each completed stage emits exactly one
//! [`ProgressEvent`] before the next stage starts; the final element of a
//! successful run is the [`Report`] itself. A fatal failure (planning or
//! writing) terminates the stream with an `Err` naming the stage and no
//! partial report.
//!
//! Runs are fully independent: the orchestrator is `Clone`, every run owns
//! its plan and outcomes, and nothing is cached across runs. Abandoning
//! the stream drops the run future, which aborts in-flight searches; the
//! partially collected outcomes are discarded.

use crate::llm::LLMClient;
use crate::mail::SmtpSender;
use crate::research::{
    Deliverer, ReportDraftInput, ReportWriter, SearchExecutor, SearchPlanner,
    executor::DEFAULT_MAX_CONCURRENT_SEARCHES,
};
use crate::search::SearchClient;
use crate::types::{AppError, ProgressEvent, Result, RunEvent};
use futures::Stream;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Default number of searches the planner is asked for.
pub const DEFAULT_PLANNED_SEARCHES: usize = 3;

/// Coordinates planning, concurrent searching, report synthesis, and
/// delivery into one ordered progress stream.
#[derive(Clone)]
pub struct ResearchOrchestrator {
    planner: SearchPlanner,
    executor: SearchExecutor,
    writer: ReportWriter,
    deliverer: Deliverer,
    trace_base_url: Option<String>,
}

impl ResearchOrchestrator {
    /// Start building an orchestrator over the two mandatory
    /// collaborators. Delivery and tracing are optional.
    pub fn builder(
        llm: Arc<dyn LLMClient>,
        search: Arc<dyn SearchClient>,
    ) -> ResearchOrchestratorBuilder {
        ResearchOrchestratorBuilder {
            llm,
            search,
            smtp: None,
            recipient: None,
            planned_searches: DEFAULT_PLANNED_SEARCHES,
            max_concurrent_searches: DEFAULT_MAX_CONCURRENT_SEARCHES,
            trace_base_url: None,
        }
    }

    /// Run the full research pipeline for one query.
    ///
    /// Returns a lazy, finite stream. Events arrive in strict stage order:
    /// an optional `TraceReference`, then `PlanningComplete`,
    /// `SearchingComplete`, `ReportComplete`, `DeliveryComplete`, and
    /// finally the `FinalReport`. Nothing happens until the stream is
    /// polled; it cannot be restarted.
    ///
    /// # Errors
    ///
    /// The stream terminates with `Err` for an empty query
    /// ([`AppError::InvalidQuery`], before any event), a planning failure
    /// ([`AppError::Planning`]), or a writing failure
    /// ([`AppError::Writing`], which also covers the case where every
    /// planned search failed and there is nothing to synthesize from).
    pub fn run(&self, query: impl Into<String>) -> impl Stream<Item = Result<RunEvent>> + Send + 'static {
        let this = self.clone();
        let raw_query = query.into();

        async_stream::try_stream! {
            let query = raw_query.trim().to_string();
            if query.is_empty() {
                Err(AppError::InvalidQuery(
                    "query must not be empty".to_string(),
                ))?;
            }

            let run_id = Uuid::new_v4();
            let started = Instant::now();
            tracing::info!(%run_id, %query, "Research run starting");

            if let Some(base) = &this.trace_base_url {
                let url = format!("{}/runs/{}", base.trim_end_matches('/'), run_id);
                yield RunEvent::Progress(ProgressEvent::TraceReference { url });
            }

            let plan = this.planner.plan(&query).await?;
            yield RunEvent::Progress(ProgressEvent::PlanningComplete {
                task_count: plan.len(),
            });

            let outcomes = this.executor.execute(&plan).await;
            let success_count = outcomes.iter().filter(|o| o.is_success()).count();
            let failure_count = outcomes.len() - success_count;
            yield RunEvent::Progress(ProgressEvent::SearchingComplete {
                success_count,
                failure_count,
            });

            // Policy: an all-failed search stage aborts the run rather
            // than attempting a report from zero findings. Surfaced as a
            // Writing-stage failure since Searching itself completed.
            if success_count == 0 {
                Err(AppError::Writing(format!(
                    "no successful search findings to synthesize ({} searches failed)",
                    failure_count
                )))?;
            }

            let input = ReportDraftInput::from_outcomes(&query, &outcomes);
            let report = this.writer.write(&input).await?;
            yield RunEvent::Progress(ProgressEvent::ReportComplete);

            let delivery = this.deliverer.deliver(&report).await;
            yield RunEvent::Progress(ProgressEvent::DeliveryComplete {
                delivered: delivery.delivered,
            });

            tracing::info!(
                %run_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                success_count,
                failure_count,
                delivered = delivery.delivered,
                "Research run complete"
            );
            yield RunEvent::FinalReport(report);
        }
    }
}

/// Builder for [`ResearchOrchestrator`].
pub struct ResearchOrchestratorBuilder {
    llm: Arc<dyn LLMClient>,
    search: Arc<dyn SearchClient>,
    smtp: Option<Arc<dyn SmtpSender>>,
    recipient: Option<String>,
    planned_searches: usize,
    max_concurrent_searches: usize,
    trace_base_url: Option<String>,
}

impl ResearchOrchestratorBuilder {
    /// Enable email delivery through the given transport.
    pub fn mailer(mut self, smtp: Arc<dyn SmtpSender>) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Address the finished report is sent to.
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// How many searches the planner is asked for per query.
    pub fn planned_searches(mut self, count: usize) -> Self {
        self.planned_searches = count;
        self
    }

    /// Cap on simultaneously in-flight searches.
    pub fn max_concurrent_searches(mut self, count: usize) -> Self {
        self.max_concurrent_searches = count;
        self
    }

    /// Base URL for per-run trace links. Absent means no
    /// `TraceReference` events.
    pub fn trace_base_url(mut self, url: impl Into<String>) -> Self {
        self.trace_base_url = Some(url.into());
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> ResearchOrchestrator {
        ResearchOrchestrator {
            planner: SearchPlanner::new(Arc::clone(&self.llm), self.planned_searches),
            executor: SearchExecutor::new(self.search, self.max_concurrent_searches),
            writer: ReportWriter::new(self.llm),
            deliverer: Deliverer::new(self.smtp, self.recipient),
            trace_base_url: self.trace_base_url,
        }
    }
}
