//! Core types for the research pipeline.
//!
//! Everything a run produces or consumes lives here: the search plan and its
//! tasks, per-task outcomes, the final report, the progress events streamed
//! to the caller, and the error taxonomy.

use serde::{Deserialize, Serialize};

// ============= Planning Types =============

/// A single targeted search produced by the planner.
///
/// Immutable once planned; the executor consumes tasks in planning order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTask {
    /// The term to search the web for.
    pub search_term: String,
    /// Why this search contributes to answering the query.
    pub rationale: String,
}

/// An ordered, non-empty set of search tasks for one run.
///
/// The planner guarantees at least one task; an empty plan is a
/// [`AppError::Planning`] failure, not an empty `SearchPlan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPlan {
    /// Tasks in planning order. Outcome order matches this order.
    pub tasks: Vec<SearchTask>,
}

impl SearchPlan {
    /// Number of planned searches.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the plan holds no tasks. Only seen in tests; the planner
    /// rejects empty plans before one can reach the executor.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============= Search Outcome Types =============

/// The result of one search task. Every task yields exactly one outcome;
/// the executor never drops a task silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The search ran and produced a findings summary.
    Success {
        /// The term that was searched.
        search_term: String,
        /// Condensed findings for the report writer.
        summary: String,
    },
    /// The search failed (collaborator error, timeout, or empty results).
    Failed {
        /// The term that was searched.
        search_term: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl SearchOutcome {
    /// True for `Success` outcomes.
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success { .. })
    }

    /// The search term this outcome belongs to.
    pub fn search_term(&self) -> &str {
        match self {
            SearchOutcome::Success { search_term, .. } => search_term,
            SearchOutcome::Failed { search_term, .. } => search_term,
        }
    }
}

// ============= Report Types =============

/// The terminal artifact of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// A few sentences summarizing the findings.
    pub short_summary: String,
    /// The full report in markdown.
    pub markdown_body: String,
    /// Suggested directions for further research.
    pub follow_up_questions: Vec<String>,
}

/// Result of the delivery stage. Delivery never fails the run; a transport
/// error is captured here as `delivered: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Whether the report was handed to the mail transport successfully.
    pub delivered: bool,
    /// Transport response or failure detail.
    pub detail: String,
}

// ============= Progress Stream Types =============

/// Progress notifications emitted as each pipeline stage completes.
///
/// Transient and stream-only; never persisted. The `Display` impl renders
/// the human-readable status lines shown to end users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Observability link for this run, emitted before any stage when a
    /// trace base URL is configured.
    TraceReference {
        /// URL describing the run.
        url: String,
    },
    /// Planning finished; searching is about to start.
    PlanningComplete {
        /// Number of searches planned.
        task_count: usize,
    },
    /// All searches finished (each with a success or failure outcome).
    SearchingComplete {
        /// Searches that produced a findings summary.
        success_count: usize,
        /// Searches that failed and were excluded from synthesis.
        failure_count: usize,
    },
    /// The report was synthesized.
    ReportComplete,
    /// Delivery was attempted.
    DeliveryComplete {
        /// Whether the email was handed off successfully.
        delivered: bool,
    },
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::TraceReference { url } => write!(f, "View trace: {}", url),
            ProgressEvent::PlanningComplete { task_count } => {
                write!(f, "Searches planned ({}), starting to search...", task_count)
            }
            ProgressEvent::SearchingComplete {
                success_count,
                failure_count,
            } => write!(
                f,
                "Searches complete ({} succeeded, {} failed), writing report...",
                success_count, failure_count
            ),
            ProgressEvent::ReportComplete => write!(f, "Report written, sending email..."),
            ProgressEvent::DeliveryComplete { delivered } => {
                if *delivered {
                    write!(f, "Email sent, research complete")
                } else {
                    write!(f, "Email not sent, research complete")
                }
            }
        }
    }
}

/// One element of the run's output stream: either a progress notification
/// or, for exactly the final element of a successful run, the report.
///
/// An explicit tagged variant so consumers never have to sniff string
/// prefixes to tell status lines from the final artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunEvent {
    /// A stage-boundary progress notification.
    Progress(ProgressEvent),
    /// The finished report. Always last, exactly one per successful run.
    FinalReport(Report),
}

// ============= Pipeline Stages =============

/// The stages a run moves through, strictly forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Turning the query into a search plan.
    Planning,
    /// Running the planned searches concurrently.
    Searching,
    /// Synthesizing the report from successful findings.
    Writing,
    /// Emailing the finished report.
    Delivering,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Planning => write!(f, "Planning"),
            Stage::Searching => write!(f, "Searching"),
            Stage::Writing => write!(f, "Writing"),
            Stage::Delivering => write!(f, "Delivering"),
        }
    }
}

// ============= API Types =============

/// Request body for the research endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// The free-text research query.
    pub query: String,
}

// ============= Error Types =============

/// Application error taxonomy.
///
/// `Planning` and `Writing` are fatal to a run. `Search` and `Mail`
/// errors are raised by the collaborators but absorbed into
/// [`SearchOutcome::Failed`] and [`DeliveryOutcome`] before they can
/// reach the run's output stream.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The query was empty or otherwise unusable. Rejected before any
    /// stage runs.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The planner failed or produced an unusable plan. Fatal.
    #[error("Planning failed: {0}")]
    Planning(String),

    /// Report synthesis failed, or there were no findings to write from.
    /// Fatal.
    #[error("Writing failed: {0}")]
    Writing(String),

    /// An LLM collaborator call failed.
    #[error("LLM error: {0}")]
    LLM(String),

    /// A web search call failed or returned nothing.
    #[error("Search error: {0}")]
    Search(String),

    /// An SMTP transport call failed at send time. Absorbed into
    /// [`DeliveryOutcome`] by the deliverer, never fatal.
    #[error("Mail error: {0}")]
    Mail(String),

    /// Missing or malformed configuration, including SMTP settings.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// The pipeline stage a fatal error aborted, if the error is one of
    /// the run-fatal variants.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Planning(_) => Some(Stage::Planning),
            AppError::Writing(_) => Some(Stage::Writing),
            _ => None,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidQuery(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Planning(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Writing(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::LLM(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Search(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Mail(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
