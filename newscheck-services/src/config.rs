//! Service configuration from environment variables

use std::env;
use std::str::FromStr;
use std::time::Duration;

use newscheck_ai::{AiProvider, DEFAULT_MODEL};
use newscheck_core::{NewsCheckError, NewsCheckResult};
use newscheck_sources::{AI_MODEL_TIMEOUT, DATA_API_TIMEOUT, NEWS_API_BASE_URL};

/// Runtime configuration.
///
/// Every credential is optional: a missing one degrades its upstream to
/// fallback content (data APIs) or an explicit failure message (AI calls).
#[derive(Debug, Clone)]
pub struct NewsCheckConfig {
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub fact_check_api_key: Option<String>,
    pub claimbuster_api_key: Option<String>,
    /// Only used to report configuration; async-openai reads the variable itself
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub huggingface_api_key: Option<String>,
    pub ai_provider: AiProvider,
    pub data_api_timeout: Duration,
    pub ai_timeout: Duration,
    pub server_port: u16,
}

impl Default for NewsCheckConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_api_base_url: NEWS_API_BASE_URL.to_string(),
            fact_check_api_key: None,
            claimbuster_api_key: None,
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            huggingface_api_key: None,
            ai_provider: AiProvider::default(),
            data_api_timeout: DATA_API_TIMEOUT,
            ai_timeout: AI_MODEL_TIMEOUT,
            server_port: 3001,
        }
    }
}

impl NewsCheckConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> NewsCheckResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, treating blank values as unset
    pub fn from_lookup<F>(lookup: F) -> NewsCheckResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let ai_provider = match get("AI_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => defaults.ai_provider,
        };

        Ok(Self {
            news_api_key: get("NEWS_API_KEY"),
            news_api_base_url: get("NEWS_API_BASE_URL").unwrap_or(defaults.news_api_base_url),
            fact_check_api_key: get("GOOGLE_FACT_CHECK_API_KEY"),
            claimbuster_api_key: get("CLAIMBUSTER_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            ai_provider,
            data_api_timeout: parse_or(
                "DATA_API_TIMEOUT_SECS",
                get("DATA_API_TIMEOUT_SECS"),
                defaults.data_api_timeout.as_secs(),
            )
            .map(Duration::from_secs)?,
            ai_timeout: parse_or("AI_TIMEOUT_SECS", get("AI_TIMEOUT_SECS"), defaults.ai_timeout.as_secs())
                .map(Duration::from_secs)?,
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), 3001)?,
        })
    }

    /// Upstream names mapped to whether they have credentials
    pub fn configured_upstreams(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("news_api", self.news_api_key.is_some()),
            ("fact_check", self.fact_check_api_key.is_some()),
            ("claimbuster", self.claimbuster_api_key.is_some()),
            ("openai", self.openai_api_key.is_some()),
            ("huggingface", self.huggingface_api_key.is_some()),
        ]
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> NewsCheckResult<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| NewsCheckError::config(format!("{} must be a number, got '{}'", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> NewsCheckResult<NewsCheckConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NewsCheckConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert!(config.news_api_key.is_none());
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.ai_provider, AiProvider::OpenAi);
        assert_eq!(config.data_api_timeout, DATA_API_TIMEOUT);
        assert_eq!(config.ai_timeout, AI_MODEL_TIMEOUT);
        assert_eq!(config.server_port, 3001);
        assert!(config.configured_upstreams().iter().all(|(_, set)| !set));
    }

    #[test]
    fn test_default_budgets_follow_source_constants() {
        let config = NewsCheckConfig::default();
        assert_eq!(config.data_api_timeout, DATA_API_TIMEOUT);
        assert_eq!(config.ai_timeout, AI_MODEL_TIMEOUT);

        let loaded = load(&[("DATA_API_TIMEOUT_SECS", "25")]).unwrap();
        assert_eq!(loaded.data_api_timeout, Duration::from_secs(25));
        assert_eq!(loaded.ai_timeout, AI_MODEL_TIMEOUT);
    }

    #[test]
    fn test_values_are_read_and_blank_means_unset() {
        let config = load(&[
            ("NEWS_API_KEY", "abc"),
            ("CLAIMBUSTER_API_KEY", "   "),
            ("AI_PROVIDER", "huggingface"),
            ("SERVER_PORT", "8080"),
            ("AI_TIMEOUT_SECS", "45"),
        ])
        .unwrap();
        assert_eq!(config.news_api_key.as_deref(), Some("abc"));
        assert!(config.claimbuster_api_key.is_none());
        assert_eq!(config.ai_provider, AiProvider::HuggingFace);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.ai_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_invalid_numbers_are_config_errors() {
        let err = load(&[("DATA_API_TIMEOUT_SECS", "ten")]).unwrap_err();
        assert!(matches!(err, NewsCheckError::Config(_)));
        assert!(load(&[("SERVER_PORT", "99999")]).is_err());
        assert!(load(&[("AI_PROVIDER", "other")]).is_err());
    }
}
