//! Cross-encoder reranking of retrieval candidates
//!
//! The first-stage vector search is cheap but coarse; the reranker scores
//! each (query, passage) pair jointly and reorders the candidate set.

mod http_backend;

pub use http_backend::*;

use crate::error::Result;
use async_trait::async_trait;

/// Relevance score for one candidate, addressed by its original index
#[derive(Debug, Clone)]
pub struct RerankResult {
    pub index: usize,
    pub score: f32,
}

/// Trait for reranking providers
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Score each document against the query; one result per input document
    async fn rerank(&self, query: &str, documents: Vec<String>) -> Result<Vec<RerankResult>>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Order rerank results by descending score, breaking ties by original
/// retrieval order, and truncate to `top_k`.
pub fn order_results(mut results: Vec<RerankResult>, top_k: usize) -> Vec<RerankResult> {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    results.truncate(top_k);
    results
}
