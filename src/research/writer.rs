//! Report synthesis.
//!
//! The writer runs exactly once per run, after the full outcome sequence
//! is available. It synthesizes only the successful findings; failed
//! searches are excluded but their count is kept for diagnostics. The
//! writer never fabricates search results it does not have: zero findings
//! is a [`AppError::Writing`] error, not a fallback.

use crate::llm::LLMClient;
use crate::types::{AppError, Report, Result, SearchOutcome};
use serde::Deserialize;
use std::sync::Arc;

const WRITER_SYSTEM_PROMPT: &str = "You are a senior researcher writing a cohesive report for a \
research query. You will be given the original query and summarized findings from web searches. \
First think through an outline, then write the report in markdown. Aim for 5-10 pages of \
content, at least 1000 words. Respond with strict JSON only, no prose outside it, matching:\n\
{\"short_summary\": \"2-3 sentence summary\", \"markdown_body\": \"the full report\", \
\"follow_up_questions\": [\"suggested further research topics\"]}";

/// Wire shape of the writer's JSON response.
#[derive(Debug, Deserialize)]
struct WriterResponse {
    short_summary: String,
    markdown_body: String,
    #[serde(default)]
    follow_up_questions: Vec<String>,
}

/// The original query plus the successful findings to synthesize from.
#[derive(Debug, Clone)]
pub struct ReportDraftInput {
    /// The query that triggered the run.
    pub query: String,
    /// Summaries from successful searches, in task order.
    pub findings: Vec<String>,
    /// How many searches failed and were excluded. Diagnostic only.
    pub failed_count: usize,
}

impl ReportDraftInput {
    /// Build the draft input from the executor's outcome sequence.
    pub fn from_outcomes(query: &str, outcomes: &[SearchOutcome]) -> Self {
        let findings = outcomes
            .iter()
            .filter_map(|o| match o {
                SearchOutcome::Success { summary, .. } => Some(summary.clone()),
                SearchOutcome::Failed { .. } => None,
            })
            .collect::<Vec<_>>();
        let failed_count = outcomes.len() - findings.len();

        Self {
            query: query.to_string(),
            findings,
            failed_count,
        }
    }
}

/// Synthesizes search findings into the final report.
#[derive(Clone)]
pub struct ReportWriter {
    llm: Arc<dyn LLMClient>,
}

impl ReportWriter {
    /// Create a writer over the given LLM collaborator.
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Writing`] when there are no findings to work
    /// from, when the collaborator fails, or when its output cannot be
    /// parsed as a report.
    pub async fn write(&self, input: &ReportDraftInput) -> Result<Report> {
        if input.findings.is_empty() {
            return Err(AppError::Writing(
                "No successful search findings to synthesize".to_string(),
            ));
        }

        if input.failed_count > 0 {
            tracing::warn!(
                failed_count = input.failed_count,
                "Writing report without findings from failed searches"
            );
        }

        let prompt = format!(
            "Original query: {}\n\nSummarized search results:\n{}",
            input.query,
            input
                .findings
                .iter()
                .enumerate()
                .map(|(i, f)| format!("[{}] {}", i + 1, f))
                .collect::<Vec<_>>()
                .join("\n\n")
        );

        let response = self
            .llm
            .generate_with_system(WRITER_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| AppError::Writing(e.to_string()))?;

        let parsed: WriterResponse = serde_json::from_str(super::strip_code_fence(&response))
            .map_err(|e| AppError::Writing(format!("Malformed report from LLM: {}", e)))?;

        if parsed.markdown_body.trim().is_empty() {
            return Err(AppError::Writing(
                "LLM produced an empty report body".to_string(),
            ));
        }

        Ok(Report {
            short_summary: parsed.short_summary,
            markdown_body: parsed.markdown_body,
            follow_up_questions: parsed.follow_up_questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedLLM {
        response: String,
    }

    #[async_trait]
    impl LLMClient for CannedLLM {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }

        async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn success(term: &str, summary: &str) -> SearchOutcome {
        SearchOutcome::Success {
            search_term: term.to_string(),
            summary: summary.to_string(),
        }
    }

    fn failed(term: &str) -> SearchOutcome {
        SearchOutcome::Failed {
            search_term: term.to_string(),
            reason: "boom".to_string(),
        }
    }

    #[test]
    fn test_draft_input_excludes_failures_but_counts_them() {
        let outcomes = vec![success("a", "one"), failed("b"), success("c", "two")];
        let input = ReportDraftInput::from_outcomes("query", &outcomes);

        assert_eq!(input.findings, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(input.failed_count, 1);
    }

    #[tokio::test]
    async fn test_write_parses_report() {
        let writer = ReportWriter::new(Arc::new(CannedLLM {
            response: r##"{"short_summary": "s", "markdown_body": "# Report", "follow_up_questions": ["q1"]}"##.to_string(),
        }));
        let input = ReportDraftInput::from_outcomes("query", &[success("a", "one")]);

        let report = writer.write(&input).await.unwrap();
        assert_eq!(report.short_summary, "s");
        assert_eq!(report.markdown_body, "# Report");
        assert_eq!(report.follow_up_questions, vec!["q1".to_string()]);
    }

    #[tokio::test]
    async fn test_write_with_zero_findings_is_a_writing_error() {
        let writer = ReportWriter::new(Arc::new(CannedLLM {
            response: "irrelevant".to_string(),
        }));
        let input = ReportDraftInput::from_outcomes("query", &[failed("a"), failed("b")]);

        let err = writer.write(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Writing(_)));
    }

    #[tokio::test]
    async fn test_malformed_output_is_a_writing_error() {
        let writer = ReportWriter::new(Arc::new(CannedLLM {
            response: "Sure! Here's your report: ...".to_string(),
        }));
        let input = ReportDraftInput::from_outcomes("query", &[success("a", "one")]);

        let err = writer.write(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Writing(_)));
    }

    #[tokio::test]
    async fn test_missing_follow_ups_defaults_to_empty() {
        let writer = ReportWriter::new(Arc::new(CannedLLM {
            response: r#"{"short_summary": "s", "markdown_body": "body"}"#.to_string(),
        }));
        let input = ReportDraftInput::from_outcomes("query", &[success("a", "one")]);

        let report = writer.write(&input).await.unwrap();
        assert!(report.follow_up_questions.is_empty());
    }
}
