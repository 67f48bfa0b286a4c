use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Who outreach emails are written on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub name: String,
    pub email: String,
    pub company: String,
    pub pitch: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    /// Default number of scoring calls in flight per batch.
    pub scoring_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
    /// `None` unless both SENDER_NAME and COMPANY_NAME are set.
    pub sender: Option<SenderIdentity>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").with_context(|| {
            "Required environment variable 'OPENAI_API_KEY' is not set".to_string()
        })?;

        let llm_timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 120,
        };

        let scoring_concurrency = match get("SCORING_CONCURRENCY") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .context("SCORING_CONCURRENCY must be a positive integer")?
                .max(1),
            None => 5,
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8000,
        };

        let sender = match (get("SENDER_NAME"), get("COMPANY_NAME")) {
            (Some(name), Some(company)) => Some(SenderIdentity {
                name,
                company,
                email: get("SENDER_EMAIL").unwrap_or_default(),
                pitch: get("COMPANY_PITCH").unwrap_or_default(),
            }),
            _ => None,
        };

        Ok(Config {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs,
            scoring_concurrency,
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            sender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.llm_timeout_secs, 120);
        assert_eq!(config.scoring_concurrency, 5);
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
        assert!(config.sender.is_none());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        assert!(Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_malformed_numbers_fail() {
        let err = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "k"),
            ("SCORING_CONCURRENCY", "-2"),
        ]))
        .is_err());
    }

    #[test]
    fn test_zero_concurrency_is_raised_to_one() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "k"),
            ("SCORING_CONCURRENCY", "0"),
        ]))
        .unwrap();
        assert_eq!(config.scoring_concurrency, 1);
    }

    #[test]
    fn test_sender_requires_name_and_company() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "k"),
            ("SENDER_NAME", "Sam"),
        ]))
        .unwrap();
        assert!(config.sender.is_none());

        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "k"),
            ("SENDER_NAME", "Sam"),
            ("COMPANY_NAME", "Acme"),
            ("SENDER_EMAIL", "sam@acme.test"),
        ]))
        .unwrap();
        assert_eq!(
            config.sender,
            Some(SenderIdentity {
                name: "Sam".to_string(),
                email: "sam@acme.test".to_string(),
                company: "Acme".to_string(),
                pitch: String::new(),
            })
        );
    }
}
