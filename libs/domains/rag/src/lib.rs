//! RAG Domain Library
//!
//! Retrieval-augmented generation over a remote vector store: incoming text is
//! embedded, matched against stored documents in Qdrant, and handed to a chat
//! model together with the best matches to synthesize an answer.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────────┐
//!              │  RagService  │  ← index / query orchestration
//!              └──────┬───────┘
//!        ┌────────────┼─────────────────┐
//! ┌──────▼──────┐ ┌───▼──────────────┐ ┌▼───────────────────┐
//! │VectorRepo-  │ │EmbeddingProvider │ │CompletionProvider  │
//! │sitory       │ │   (trait)        │ │   (trait)          │
//! └──────┬──────┘ └───┬──────────────┘ └┬───────────────────┘
//! ┌──────▼──────┐ ┌───▼──────────────┐ ┌▼───────────────────┐
//! │QdrantRepo-  │ │OpenAIEmbedding-  │ │OpenAICompletion-   │
//! │sitory       │ │Provider          │ │Provider            │
//! └─────────────┘ └──────────────────┘ └────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_rag::{
//!     OpenAICompletionProvider, OpenAIConfig, OpenAIEmbeddingProvider, QdrantConfig,
//!     QdrantRepository, QueryRequest, RagConfig, RagService,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let openai = OpenAIConfig::new("sk-...".to_string());
//! let repository = QdrantRepository::connect(QdrantConfig::default()).await?;
//!
//! let service = RagService::new(
//!     Arc::new(repository),
//!     Arc::new(OpenAIEmbeddingProvider::new(openai.clone())?),
//!     Arc::new(OpenAICompletionProvider::new(openai)?),
//!     RagConfig::default(),
//! );
//!
//! let response = service.query(QueryRequest::new("What is Qdrant?")).await?;
//! println!("{}", response.answer);
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openai;
pub mod qdrant;
pub mod repository;
pub mod samples;
pub mod service;

pub use completion::{CompletionProvider, OpenAICompletionProvider};
pub use config::RagConfig;
pub use embedding::{EmbeddingProvider, OpenAIEmbeddingProvider};
pub use error::{RagError, RagResult};
pub use handlers::{RagApiDoc, rag_router};
pub use models::{
    CollectionStats, Document, DocumentList, IndexRequest, IndexResponse, QueryRequest,
    QueryResponse, RelevantDocument,
};
pub use openai::OpenAIConfig;
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::RagService;
