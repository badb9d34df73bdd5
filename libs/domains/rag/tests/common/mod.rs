//! In-memory stand-ins for the remote collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use domain_rag::{
    CollectionStats, CompletionProvider, Document, EmbeddingProvider, RagError, RagResult,
    RelevantDocument, VectorRepository,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DIMENSION: usize = 128;

/// Bag-of-words embedding with a constant component, so related texts score
/// high and unrelated texts still get a small positive similarity.
#[derive(Default)]
pub struct HashEmbedder {
    pub calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; DIMENSION];
        vector[0] = 3.0;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let bucket = 1 + (hasher.finish() as usize % (DIMENSION - 1));
            vector[bucket] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("poison") {
            return Err(RagError::Embedding("rejected by fake".to_string()));
        }
        Ok(Self::vector(text))
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm = |v: &[f32]| v.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm(a) * norm(b))
}

/// Keeps points in insertion order and ranks by cosine similarity like the real store
#[derive(Default)]
pub struct InMemoryRepository {
    points: Mutex<Vec<(Document, Vec<f32>)>>,
}

impl InMemoryRepository {
    pub fn len(&self) -> usize {
        self.points.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorRepository for InMemoryRepository {
    async fn ensure_collection(&self) -> RagResult<()> {
        Ok(())
    }

    async fn upsert(&self, document: &Document, vector: Vec<f32>) -> RagResult<()> {
        if vector.len() != DIMENSION {
            return Err(RagError::Store(format!(
                "wrong vector dimension: expected {}, got {}",
                DIMENSION,
                vector.len()
            )));
        }

        let mut points = self.points.lock().unwrap();
        points.retain(|(doc, _)| doc.id != document.id);
        points.push((document.clone(), vector));
        Ok(())
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> RagResult<Vec<RelevantDocument>> {
        let points = self.points.lock().unwrap();
        let mut hits: Vec<RelevantDocument> = points
            .iter()
            .map(|(doc, v)| RelevantDocument {
                document: doc.clone(),
                score: cosine(&vector, v),
            })
            .filter(|hit| hit.score >= score_threshold)
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn scroll(&self, limit: u32, source: Option<String>) -> RagResult<Vec<Document>> {
        let points = self.points.lock().unwrap();
        Ok(points
            .iter()
            .map(|(doc, _)| doc)
            .filter(|doc| source.as_deref().is_none_or(|s| doc.source == s))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> RagResult<()> {
        self.points.lock().unwrap().retain(|(doc, _)| doc.id != id);
        Ok(())
    }

    async fn collection_info(&self) -> RagResult<CollectionStats> {
        Ok(CollectionStats {
            name: "rag_documents".to_string(),
            status: "green".to_string(),
            points_count: self.len() as u64,
            vector_size: DIMENSION as u64,
            distance: "Cosine".to_string(),
        })
    }
}

/// Echoes which documents it was given
#[derive(Default)]
pub struct EchoCompleter {
    pub last_context: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionProvider for EchoCompleter {
    async fn complete(
        &self,
        query: &str,
        relevant_docs: &[RelevantDocument],
        min_score: f32,
    ) -> RagResult<String> {
        let used: Vec<String> = relevant_docs
            .iter()
            .filter(|doc| doc.score >= min_score)
            .map(|doc| doc.document.id.clone())
            .collect();
        *self.last_context.lock().unwrap() = used.clone();

        if used.is_empty() {
            Ok(format!("General answer to: {}", query))
        } else {
            Ok(format!("Answer to '{}' from {} document(s)", query, used.len()))
        }
    }
}

pub fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
