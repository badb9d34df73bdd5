use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_rag::{OpenAIConfig, QdrantConfig, RagConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library and the RAG domain
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub openai: OpenAIConfig,
    pub qdrant: QdrantConfig,
    pub rag: RagConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let openai = OpenAIConfig::from_env()?; // Required - OPENAI_API_KEY must be set
        let qdrant = QdrantConfig::from_env()?;
        let rag = RagConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            openai,
            qdrant,
            rag,
        })
    }
}
