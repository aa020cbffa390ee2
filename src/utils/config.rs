//! Environment-sourced configuration.
//!
//! All secrets and endpoints are read here, once, at startup; the pipeline
//! components receive them as explicit constructor inputs and never touch
//! the process environment themselves. That keeps runs independently
//! testable and parallel-safe.

use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// LLM collaborator settings.
    pub llm: LLMConfig,
    /// Research pipeline tuning.
    pub research: ResearchConfig,
    /// Optional email delivery settings.
    pub mail: Option<MailSettings>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// LLM collaborator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    /// API key for the OpenAI-compatible endpoint.
    pub openai_api_key: String,
    /// Endpoint base URL.
    pub openai_api_base: String,
    /// Model identifier.
    pub model: String,
}

/// Research pipeline tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchConfig {
    /// How many searches the planner is asked for per query.
    pub planned_searches: usize,
    /// Cap on simultaneously in-flight searches.
    pub max_concurrent_searches: usize,
    /// How many raw web results each search fetches before summarization.
    pub search_results_per_task: usize,
    /// Base URL for per-run trace links, if any.
    pub trace_base_url: Option<String>,
}

/// Email delivery settings. Present only when SMTP is fully configured.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// SMTP relay hostname.
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    pub smtp_port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password or app-specific token.
    pub password: String,
    /// Address reports are sent from.
    pub from_address: String,
    /// Address reports are sent to.
    pub to_address: String,
}

impl Config {
    /// Load configuration from the environment (and a `.env` file when
    /// present). Only `OPENAI_API_KEY` is required; everything else has a
    /// default or is optional.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mail = match (
            env::var("SMTP_HOST").ok(),
            env::var("SMTP_USERNAME").ok(),
            env::var("SMTP_PASSWORD").ok(),
            env::var("MAIL_FROM").ok(),
            env::var("MAIL_TO").ok(),
        ) {
            (Some(smtp_host), Some(username), Some(password), Some(from_address), Some(to_address)) => {
                Some(MailSettings {
                    smtp_host,
                    smtp_port: parse_var("SMTP_PORT", 587)?,
                    username,
                    password,
                    from_address,
                    to_address,
                })
            }
            _ => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
            },
            llm: LLMConfig {
                openai_api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    AppError::Configuration("OPENAI_API_KEY is not set".to_string())
                })?,
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            research: ResearchConfig {
                planned_searches: parse_var("PLANNED_SEARCHES", 3)?,
                max_concurrent_searches: parse_var("MAX_CONCURRENT_SEARCHES", 5)?,
                search_results_per_task: parse_var("SEARCH_RESULTS_PER_TASK", 8)?,
                trace_base_url: env::var("TRACE_BASE_URL").ok(),
            },
            mail,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_absent() {
        // Use a name no test environment sets.
        let value: usize = parse_var("ARGUS_NONEXISTENT_VAR_FOR_TEST", 7).unwrap();
        assert_eq!(value, 7);
    }
}
