use std::path::PathBuf;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};

pub const DEFAULT_INDEX_CONCURRENCY: usize = 4;
pub const DEFAULT_SAMPLE_DIR: &str = "./documents";

/// Orchestration settings
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Documents embedded and stored at once during bulk indexing
    pub index_concurrency: usize,
    /// Folder ingested by `POST /index/sample`
    pub sample_dir: PathBuf,
}

impl RagConfig {
    pub fn with_index_concurrency(mut self, concurrency: usize) -> Self {
        self.index_concurrency = concurrency.max(1);
        self
    }

    pub fn with_sample_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sample_dir = dir.into();
        self
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            index_concurrency: DEFAULT_INDEX_CONCURRENCY,
            sample_dir: PathBuf::from(DEFAULT_SAMPLE_DIR),
        }
    }
}

impl FromEnv for RagConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let index_concurrency =
            env_parse_or_default("RAG_INDEX_CONCURRENCY", DEFAULT_INDEX_CONCURRENCY)?;
        if index_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RAG_INDEX_CONCURRENCY".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            index_concurrency,
            sample_dir: PathBuf::from(env_or_default("RAG_SAMPLE_DIR", DEFAULT_SAMPLE_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(["RAG_INDEX_CONCURRENCY", "RAG_SAMPLE_DIR"], || {
            let config = RagConfig::from_env().unwrap();
            assert_eq!(config.index_concurrency, 4);
            assert_eq!(config.sample_dir, PathBuf::from("./documents"));
        });
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        temp_env::with_var("RAG_INDEX_CONCURRENCY", Some("0"), || {
            assert!(matches!(
                RagConfig::from_env(),
                Err(ConfigError::InvalidValue { .. })
            ));
        });
    }

    #[test]
    fn test_unparsable_concurrency_rejected() {
        temp_env::with_var("RAG_INDEX_CONCURRENCY", Some("many"), || {
            assert!(matches!(
                RagConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }
}
