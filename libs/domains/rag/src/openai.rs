use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use reqwest::Client;

use crate::error::{RagError, RagResult};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Connection and generation settings shared by the OpenAI providers
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.1,
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn http_client(&self) -> RagResult<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| RagError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            embedding_model: env_or_default("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            chat_model: env_or_default("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            max_tokens: env_parse_or_default("OPENAI_MAX_TOKENS", 1000)?,
            temperature: env_parse_or_default("OPENAI_TEMPERATURE", 0.1)?,
            timeout_secs: env_parse_or_default("OPENAI_TIMEOUT_SECS", 30)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_EMBEDDING_MODEL",
        "OPENAI_CHAT_MODEL",
        "OPENAI_MAX_TOKENS",
        "OPENAI_TEMPERATURE",
        "OPENAI_TIMEOUT_SECS",
    ];

    #[test]
    fn test_api_key_required() {
        temp_env::with_vars_unset(VARS, || {
            let err = OpenAIConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "OPENAI_API_KEY"));
        });
    }

    #[test]
    fn test_defaults_from_env() {
        let vars = VARS.map(|key| (key, (key == "OPENAI_API_KEY").then_some("sk-test")));
        temp_env::with_vars(vars, || {
            let config = OpenAIConfig::from_env().unwrap();
            assert_eq!(config.api_key, "sk-test");
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.embedding_model, "text-embedding-ada-002");
            assert_eq!(config.chat_model, "gpt-3.5-turbo");
            assert_eq!(config.max_tokens, 1000);
            assert!((config.temperature - 0.1).abs() < f32::EPSILON);
            assert_eq!(config.timeout_secs, 30);
        });
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = OpenAIConfig::new("k".into()).with_base_url("http://localhost:9999/v1/".into());
        assert_eq!(config.endpoint("embeddings"), "http://localhost:9999/v1/embeddings");
    }
}
