//! Shared test doubles: an in-memory vector index and deterministic
//! capability providers.

use async_trait::async_trait;
use docshelf::embed::Embedder;
use docshelf::error::{Error, Result};
use docshelf::generate::Generator;
use docshelf::rerank::{Reranker, RerankResult};
use docshelf::store::{ChunkPayload, ChunkPoint, SearchFilter, SearchHit, VectorIndex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the Qdrant collection
pub struct MemoryIndex {
    dimension: usize,
    points: Mutex<Vec<ChunkPoint>>,
}

impl MemoryIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.points.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, new_points: Vec<ChunkPoint>) -> Result<()> {
        if let Some(mismatch) = new_points.iter().find(|p| p.vector.len() != self.dimension) {
            return Err(Error::EmbeddingDimension {
                expected: self.dimension,
                got: mismatch.vector.len(),
            });
        }

        let mut points = self.points.lock().unwrap();
        for point in new_points {
            points.retain(|p| p.id != point.id);
            points.push(point);
        }
        Ok(())
    }

    async fn search(
        &self,
        query_vector: Vec<f32>,
        filter: Option<SearchFilter>,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let points = self.points.lock().unwrap();

        let mut hits: Vec<SearchHit> = points
            .iter()
            .filter(|p| match &filter {
                Some(f) if !f.filenames.is_empty() => {
                    f.filenames.contains(&p.payload.filename)
                }
                _ => true,
            })
            .map(|p| SearchHit {
                id: p.id.to_string(),
                score: cosine(&query_vector, &p.vector),
                payload: p.payload.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);
        Ok(hits)
    }

    async fn delete_by_filename(&self, filename: &str) -> Result<()> {
        let mut points = self.points.lock().unwrap();
        points.retain(|p| p.payload.filename != filename);
        Ok(())
    }

    async fn scroll_payloads(&self) -> Result<Vec<ChunkPayload>> {
        let points = self.points.lock().unwrap();
        Ok(points.iter().map(|p| p.payload.clone()).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// Deterministic embedder: a byte histogram over `dimension` buckets
pub struct StubEmbedder {
    pub dimension: usize,
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; self.dimension];
                for b in text.bytes() {
                    v[(b as usize) % self.dimension] += 1.0;
                }
                v
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }
}

/// Misbehaving provider: declares one dimension, returns another
pub struct WrongSizeEmbedder {
    pub declared: usize,
    pub actual: usize,
}

#[async_trait]
impl Embedder for WrongSizeEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.5; self.actual]).collect())
    }

    fn dimension(&self) -> usize {
        self.declared
    }

    fn model_name(&self) -> &str {
        "wrong-size-embedder"
    }
}

/// Deterministic reranker scoring by query-term overlap, with a call counter
pub struct StubReranker {
    calls: AtomicUsize,
}

impl StubReranker {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Reranker for StubReranker {
    async fn rerank(&self, query: &str, documents: Vec<String>) -> Result<Vec<RerankResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(documents
            .iter()
            .enumerate()
            .map(|(index, doc)| {
                let doc = doc.to_lowercase();
                let score = terms.iter().filter(|t| doc.contains(t.as_str())).count() as f32;
                RerankResult { index, score }
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "stub-reranker"
    }
}

/// Canned generator with a call counter
pub struct StubGenerator {
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "Answer grounded in {} characters of context.",
            user_prompt.len()
        ))
    }

    fn model_name(&self) -> &str {
        "stub-generator"
    }
}
