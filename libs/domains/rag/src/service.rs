use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::completion::CompletionProvider;
use crate::config::RagConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, RagResult};
use crate::models::{
    CollectionStats, DEFAULT_LIST_LIMIT, Document, DocumentList, IndexResponse, QueryRequest,
    QueryResponse,
};
use crate::repository::VectorRepository;
use crate::samples::sample_documents;

/// Orchestrates embedding, vector storage and answer generation
pub struct RagService {
    repository: Arc<dyn VectorRepository>,
    embedder: Arc<dyn EmbeddingProvider>,
    completer: Arc<dyn CompletionProvider>,
    config: RagConfig,
}

impl RagService {
    pub fn new(
        repository: Arc<dyn VectorRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        completer: Arc<dyn CompletionProvider>,
        config: RagConfig,
    ) -> Self {
        Self {
            repository,
            embedder,
            completer,
            config,
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    // ===== Indexing =====

    /// Embed and store every document.
    ///
    /// Never fails as a whole: each document is either counted in
    /// `indexed_count` or listed in `failed_docs`, in input order.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn index_documents(&self, documents: Vec<Document>) -> IndexResponse {
        let start = Instant::now();

        let outcomes: Vec<(String, bool)> = stream::iter(documents)
            .map(|mut document| async move {
                let id = document.ensure_id().to_string();
                match self.index_one(&document).await {
                    Ok(()) => (id, true),
                    Err(e) => {
                        warn!(id = %id, error = %e, "Failed to index document");
                        (id, false)
                    }
                }
            })
            .buffered(self.config.index_concurrency.max(1))
            .collect()
            .await;

        let indexed_count = outcomes.iter().filter(|(_, ok)| *ok).count();
        let failed_docs: Vec<String> = outcomes
            .into_iter()
            .filter(|(_, ok)| !*ok)
            .map(|(id, _)| id)
            .collect();

        let elapsed = start.elapsed();
        info!(
            indexed = indexed_count,
            failed = failed_docs.len(),
            elapsed = ?elapsed,
            "Indexing finished"
        );

        IndexResponse {
            success: failed_docs.is_empty(),
            indexed_count,
            failed_docs,
            processing_time: format!("{:?}", elapsed),
        }
    }

    async fn index_one(&self, document: &Document) -> RagResult<()> {
        if document.content.trim().is_empty() {
            return Err(RagError::Validation("document content is empty".to_string()));
        }

        let vector = self.embedder.embed(&document.content).await?;
        self.repository.upsert(document, vector).await
    }

    /// Index every `.txt` file directly inside `folder`.
    ///
    /// A missing folder, or one without `.txt` files, indexes the built-in
    /// sample documents instead.
    #[instrument(skip_all, fields(folder = %folder.display()))]
    pub async fn index_text_files(&self, folder: &Path) -> RagResult<IndexResponse> {
        let mut documents = load_text_files(folder).await?;

        if documents.is_empty() {
            info!("No text files found, indexing sample documents");
            documents = sample_documents();
        }

        Ok(self.index_documents(documents).await)
    }

    /// [`index_text_files`](Self::index_text_files) on the configured sample folder
    pub async fn index_sample_dir(&self) -> RagResult<IndexResponse> {
        self.index_text_files(&self.config.sample_dir).await
    }

    // ===== Querying =====

    /// Embed the query, search the store and generate an answer.
    ///
    /// The normalized threshold is used both as the search cutoff and as the
    /// minimum score for documents given to the model as context.
    #[instrument(skip_all)]
    pub async fn query(&self, request: QueryRequest) -> RagResult<QueryResponse> {
        let start = Instant::now();

        if request.query.trim().is_empty() {
            return Err(RagError::Validation("query must not be empty".to_string()));
        }

        let (top_k, threshold) = request.normalized();

        let vector = self.embedder.embed(&request.query).await?;
        let relevant_docs = self
            .repository
            .search(vector, top_k as u64, threshold)
            .await?;
        let answer = self
            .completer
            .complete(&request.query, &relevant_docs, threshold)
            .await?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            top_k,
            threshold,
            found = relevant_docs.len(),
            processing_time_ms,
            "Query answered"
        );

        Ok(QueryResponse {
            answer,
            relevant_docs,
            processing_time_ms,
        })
    }

    // ===== Documents =====

    pub async fn list_documents(&self, limit: Option<u32>) -> RagResult<DocumentList> {
        let documents = self.repository.scroll(list_limit(limit), None).await?;
        Ok(DocumentList::new(documents))
    }

    pub async fn documents_by_source(
        &self,
        source: &str,
        limit: Option<u32>,
    ) -> RagResult<DocumentList> {
        if source.trim().is_empty() {
            return Err(RagError::Validation("source must not be empty".to_string()));
        }

        let documents = self
            .repository
            .scroll(list_limit(limit), Some(source.to_string()))
            .await?;
        Ok(DocumentList::for_source(documents, source))
    }

    pub async fn delete_document(&self, id: &str) -> RagResult<()> {
        if id.trim().is_empty() {
            return Err(RagError::Validation("document id must not be empty".to_string()));
        }

        self.repository.delete(id).await?;
        info!(id, "Deleted document");
        Ok(())
    }

    pub async fn stats(&self) -> RagResult<CollectionStats> {
        self.repository.collection_info().await
    }
}

fn list_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Reads the `.txt` files (any case) directly inside `folder`, sorted by name.
///
/// A missing folder yields no documents. Unreadable files are skipped.
async fn load_text_files(folder: &Path) -> RagResult<Vec<Document>> {
    let mut entries = match tokio::fs::read_dir(folder).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(folder = %folder.display(), "Folder not found");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(RagError::Internal(format!(
                "Failed to read folder {}: {}",
                folder.display(),
                e
            )));
        }
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| RagError::Internal(format!("Failed to list {}: {}", folder.display(), e)))?
    {
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());

        if is_txt && is_file {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                continue;
            }
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        documents.push(
            Document::new(content.as_str(), file_name)
                .with_metadata("file_path", path.display().to_string())
                .with_metadata("file_size", content.len().to_string()),
        );
    }

    Ok(documents)
}
