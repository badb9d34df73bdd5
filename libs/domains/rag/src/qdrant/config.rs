use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};

pub const DEFAULT_COLLECTION: &str = "rag_documents";
pub const DEFAULT_VECTOR_SIZE: u64 = 1536;

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    /// gRPC endpoint, e.g. `http://localhost:6334`
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
    /// Dimension used when the collection has to be created
    pub vector_size: u64,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_collection(mut self, collection: String) -> Self {
        self.collection = collection;
        self
    }

    pub fn with_vector_size(mut self, vector_size: u64) -> Self {
        self.vector_size = vector_size;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl FromEnv for QdrantConfig {
    /// `QDRANT_URL` wins over `QDRANT_HOST`/`QDRANT_PORT`.
    fn from_env() -> Result<Self, ConfigError> {
        let url = match std::env::var("QDRANT_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                let host = env_or_default("QDRANT_HOST", "localhost");
                let port: u16 = env_parse_or_default("QDRANT_PORT", 6334)?;
                format!("http://{}:{}", host, port)
            }
        };

        let vector_size = env_parse_or_default("QDRANT_VECTOR_SIZE", DEFAULT_VECTOR_SIZE)?;
        if vector_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "QDRANT_VECTOR_SIZE".to_string(),
                details: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            url,
            api_key: std::env::var("QDRANT_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            collection: env_or_default("QDRANT_COLLECTION", DEFAULT_COLLECTION),
            vector_size,
            timeout_secs: env_parse_or_default("QDRANT_TIMEOUT_SECS", 30)?,
        })
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            collection: DEFAULT_COLLECTION.to_string(),
            vector_size: DEFAULT_VECTOR_SIZE,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "QDRANT_URL",
        "QDRANT_HOST",
        "QDRANT_PORT",
        "QDRANT_API_KEY",
        "QDRANT_COLLECTION",
        "QDRANT_VECTOR_SIZE",
        "QDRANT_TIMEOUT_SECS",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = QdrantConfig::from_env().unwrap();
            assert_eq!(config.url, "http://localhost:6334");
            assert_eq!(config.collection, "rag_documents");
            assert_eq!(config.vector_size, 1536);
            assert_eq!(config.timeout_secs, 30);
            assert!(config.api_key.is_none());
        });
    }

    #[test]
    fn test_host_and_port() {
        temp_env::with_vars(
            [
                ("QDRANT_URL", None),
                ("QDRANT_HOST", Some("qdrant")),
                ("QDRANT_PORT", Some("7000")),
            ],
            || {
                assert_eq!(QdrantConfig::from_env().unwrap().url, "http://qdrant:7000");
            },
        );
    }

    #[test]
    fn test_url_overrides_host() {
        temp_env::with_vars(
            [
                ("QDRANT_URL", Some("https://cloud.qdrant.io:6334")),
                ("QDRANT_HOST", Some("ignored")),
            ],
            || {
                assert_eq!(
                    QdrantConfig::from_env().unwrap().url,
                    "https://cloud.qdrant.io:6334"
                );
            },
        );
    }

    #[test]
    fn test_zero_vector_size_rejected() {
        temp_env::with_var("QDRANT_VECTOR_SIZE", Some("0"), || {
            assert!(QdrantConfig::from_env().is_err());
        });
    }
}
