//! Report delivery.
//!
//! Delivery is auxiliary: the report is the primary deliverable, and a
//! transport failure is recorded, never propagated. At most one attempt
//! per run, no retries.

use crate::mail::SmtpSender;
use crate::types::{DeliveryOutcome, Report};
use std::sync::Arc;

/// Best-effort email delivery of a finished report.
#[derive(Clone)]
pub struct Deliverer {
    smtp: Option<Arc<dyn SmtpSender>>,
    recipient: Option<String>,
}

impl Deliverer {
    /// Create a deliverer. Either piece being absent makes delivery a
    /// no-op reported as `delivered: false`.
    pub fn new(smtp: Option<Arc<dyn SmtpSender>>, recipient: Option<String>) -> Self {
        Self { smtp, recipient }
    }

    /// A deliverer that never sends anything.
    pub fn disabled() -> Self {
        Self {
            smtp: None,
            recipient: None,
        }
    }

    /// Attempt to email the report. Always returns normally.
    pub async fn deliver(&self, report: &Report) -> DeliveryOutcome {
        let (smtp, recipient) = match (&self.smtp, &self.recipient) {
            (Some(smtp), Some(recipient)) => (smtp, recipient),
            _ => {
                tracing::debug!("Email delivery not configured, skipping");
                return DeliveryOutcome {
                    delivered: false,
                    detail: "email delivery not configured".to_string(),
                };
            }
        };

        let subject = format!("Research report: {}", truncate(&report.short_summary, 120));
        let body = render_body(report);

        match smtp.send_email(recipient, &subject, &body).await {
            Ok(response) => {
                tracing::info!(recipient = %recipient, "Report emailed");
                DeliveryOutcome {
                    delivered: true,
                    detail: response,
                }
            }
            Err(e) => {
                tracing::warn!(recipient = %recipient, error = %e, "Report email failed");
                DeliveryOutcome {
                    delivered: false,
                    detail: e.to_string(),
                }
            }
        }
    }
}

fn render_body(report: &Report) -> String {
    let mut body = report.markdown_body.clone();
    if !report.follow_up_questions.is_empty() {
        body.push_str("\n\n## Follow-up questions\n");
        for question in &report.follow_up_questions {
            body.push_str("- ");
            body.push_str(question);
            body.push('\n');
        }
    }
    body
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}
