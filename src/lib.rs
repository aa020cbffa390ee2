//! # Argus - Deep Research Orchestration Server
//!
//! Argus automates open-ended research: given a natural-language query, it
//! plans a set of targeted web searches, executes them concurrently,
//! synthesizes a written report from the results, optionally delivers the
//! report by email, and reports progress incrementally to the caller while
//! the work is in flight.
//!
//! ## Overview
//!
//! Argus can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `argus-server` binary and POST
//!    queries to `/api/research`, receiving progress over SSE
//! 2. **As a library** - Drive [`research::ResearchOrchestrator`] directly
//!    from your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use argus::llm::Provider;
//! use argus::research::ResearchOrchestrator;
//! use argus::search::WebSearchClient;
//! use argus::types::RunEvent;
//! use futures::StreamExt;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = Provider::OpenAI {
//!         api_key: "sk-...".to_string(),
//!         api_base: "https://api.openai.com/v1".to_string(),
//!         model: "gpt-4o-mini".to_string(),
//!     }
//!     .create_client();
//!
//!     let search = Arc::new(WebSearchClient::new(llm.clone()));
//!     let orchestrator = ResearchOrchestrator::builder(llm, search).build();
//!
//!     let mut stream = std::pin::pin!(orchestrator.run("Latest AI agent frameworks in 2025"));
//!     while let Some(event) = stream.next().await {
//!         match event? {
//!             RunEvent::Progress(progress) => println!("{}", progress),
//!             RunEvent::FinalReport(report) => println!("{}", report.markdown_body),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`research`] - The orchestration core: planner, executor, writer,
//!   deliverer, orchestrator
//! - [`llm`] - LLM collaborator clients
//! - [`search`] - Web search collaborator
//! - [`mail`] - SMTP delivery collaborator
//! - [`api`] - REST/SSE presentation surface
//! - [`types`] - Data model and error handling
//! - [`utils`] - Configuration
//!
//! ## Failure semantics
//!
//! Planning and writing failures are fatal to a run. Individual search
//! failures are isolated per task, a delivery failure is reported but
//! never fatal, and a degraded run still yields a full report with a
//! visible count of failed searches.

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// LLM collaborator clients and abstractions.
pub mod llm;
/// SMTP email delivery collaborator.
pub mod mail;
/// The research orchestration pipeline.
pub mod research;
/// Web search collaborator.
pub mod search;
/// Core types (plans, outcomes, reports, events, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LLMClient, Provider};
pub use mail::{MailConfig, SmtpMailer, SmtpSender};
pub use research::{
    Deliverer, ReportWriter, ResearchOrchestrator, ResearchOrchestratorBuilder, SearchExecutor,
    SearchPlanner,
};
pub use search::{SearchClient, WebSearchClient};
pub use types::{AppError, Report, Result, RunEvent};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration.
    pub config: Arc<Config>,
    /// The shared orchestrator; each request gets its own independent run.
    pub orchestrator: Arc<ResearchOrchestrator>,
}
