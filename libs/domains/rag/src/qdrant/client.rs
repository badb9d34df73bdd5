use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    PointsIdsList, ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use tracing::{debug, info, instrument};

use super::QdrantConfig;
use super::payload::{self, SOURCE};
use crate::error::{RagError, RagResult};
use crate::models::{CollectionStats, Document, RelevantDocument};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository, bound to one collection
pub struct QdrantRepository {
    client: Qdrant,
    collection: String,
    vector_size: u64,
}

impl QdrantRepository {
    pub fn new(config: QdrantConfig) -> RagResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| RagError::Store(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            collection: config.collection,
            vector_size: config.vector_size,
        })
    }

    /// Build the client and make sure the collection exists.
    ///
    /// Fails when the store cannot be reached.
    pub async fn connect(config: QdrantConfig) -> RagResult<Self> {
        let repository = Self::new(config)?;
        repository.ensure_collection().await?;
        Ok(repository)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn extract_vector_params(info: &qdrant::CollectionInfo) -> (u64, String) {
        let params = info
            .config
            .as_ref()
            .and_then(|config| config.params.as_ref())
            .and_then(|params| params.vectors_config.as_ref())
            .and_then(|vectors| vectors.config.as_ref());

        match params {
            Some(qdrant::vectors_config::Config::Params(p)) => {
                (p.size, p.distance().as_str_name().to_string())
            }
            Some(qdrant::vectors_config::Config::ParamsMap(map)) => map
                .map
                .values()
                .next()
                .map(|p| (p.size, p.distance().as_str_name().to_string()))
                .unwrap_or((0, "Unknown".to_string())),
            None => (0, "Unknown".to_string()),
        }
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn ensure_collection(&self) -> RagResult<()> {
        if self.client.collection_exists(&self.collection).await? {
            info!("Collection already exists");
            return Ok(());
        }

        info!(vector_size = self.vector_size, "Creating collection");
        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(self.vector_size, Distance::Cosine)),
            )
            .await?;

        info!("Collection created");
        Ok(())
    }

    async fn upsert(&self, document: &Document, vector: Vec<f32>) -> RagResult<()> {
        let point = PointStruct::new(
            payload::to_point_id(&document.id),
            vector,
            payload::to_payload(document),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await?;

        debug!(id = %document.id, "Upserted document");
        Ok(())
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> RagResult<Vec<RelevantDocument>> {
        let builder = SearchPointsBuilder::new(&self.collection, vector, limit)
            .score_threshold(score_threshold)
            .with_payload(true);

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .and_then(payload::from_point_id)
                    .ok_or_else(|| RagError::Store("Missing point ID".to_string()))?;

                Ok(RelevantDocument {
                    document: payload::to_document(id, &point.payload),
                    score: point.score,
                })
            })
            .collect()
    }

    async fn scroll(&self, limit: u32, source: Option<String>) -> RagResult<Vec<Document>> {
        let mut builder = ScrollPointsBuilder::new(&self.collection)
            .limit(limit)
            .with_payload(true)
            .with_vectors(false);

        if let Some(source) = source {
            builder = builder.filter(Filter::must([Condition::matches(SOURCE, source)]));
        }

        let results = self.client.scroll(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .and_then(payload::from_point_id)
                    .ok_or_else(|| RagError::Store("Missing point ID".to_string()))?;

                Ok(payload::to_document(id, &point.payload))
            })
            .collect()
    }

    async fn delete(&self, id: &str) -> RagResult<()> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(PointsIdsList {
                        ids: vec![payload::to_point_id(id)],
                    })
                    .wait(true),
            )
            .await?;

        debug!(id, "Deleted document");
        Ok(())
    }

    async fn collection_info(&self) -> RagResult<CollectionStats> {
        let info = self
            .client
            .collection_info(&self.collection)
            .await?
            .result
            .ok_or_else(|| RagError::Store("Collection info missing result".to_string()))?;

        let (vector_size, distance) = Self::extract_vector_params(&info);

        Ok(CollectionStats {
            name: self.collection.clone(),
            status: info.status().as_str_name().to_lowercase(),
            points_count: info.points_count.unwrap_or_default(),
            vector_size,
            distance,
        })
    }
}
