//! Mock collaborators for testing.
//!
//! These run the full pipeline without any network dependency: a scripted
//! LLM that replays canned responses in call order, a search client with
//! configurable per-term failures, and a recording SMTP transport.

use argus::llm::LLMClient;
use argus::mail::SmtpSender;
use argus::search::SearchClient;
use argus::types::{AppError, Result, SearchTask};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays a fixed sequence of responses, one per `generate*` call.
///
/// The orchestrator consults the LLM twice per run, planner first and
/// writer second, so a happy-path script is
/// `vec![Ok(plan_json), Ok(report_json)]`. `Err` entries simulate a
/// collaborator failure at that call.
pub struct ScriptedLLM {
    responses: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedLLM {
    pub fn new(responses: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many completions were requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(AppError::LLM(reason)),
            None => Err(AppError::LLM("scripted responses exhausted".to_string())),
        }
    }
}

#[async_trait]
impl LLMClient for ScriptedLLM {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.next()
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.next()
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Search client that succeeds with a deterministic summary unless the
/// term is on its failure list. Counts every call.
pub struct MockSearch {
    fail_terms: HashSet<String>,
    calls: AtomicUsize,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            fail_terms: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, term: &str) -> Self {
        self.fail_terms.insert(term.to_string());
        self
    }

    pub fn failing_always(terms: &[&str]) -> Self {
        Self {
            fail_terms: terms.iter().map(|t| t.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, task: &SearchTask) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_terms.contains(&task.search_term) {
            return Err(AppError::Search(format!(
                "mock failure for '{}'",
                task.search_term
            )));
        }
        Ok(format!("summary for {}", task.search_term))
    }
}

/// SMTP transport that records sends, or refuses every send.
pub struct MockSmtp {
    fail: bool,
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl MockSmtp {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl SmtpSender for MockSmtp {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        if self.fail {
            return Err(AppError::Mail("mock relay refused".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok("250 Ok".to_string())
    }
}

/// Planner JSON for tasks named `t0..tN`.
pub fn plan_json(n: usize) -> String {
    let searches = (0..n)
        .map(|i| format!(r#"{{"search_term": "t{}", "rationale": "r{}"}}"#, i, i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(r#"{{"searches": [{}]}}"#, searches)
}

/// A minimal valid writer response.
pub fn report_json() -> String {
    r##"{"short_summary": "The findings in brief.", "markdown_body": "# Findings\n\nBody text.", "follow_up_questions": ["What next?"]}"##
        .to_string()
}
