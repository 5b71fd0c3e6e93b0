//! Embedding generation
//!
//! This module provides an abstraction over embedding providers with:
//! - A trait for different embedding backends
//! - An OpenAI-compatible HTTP backend
//! - Batch processing for efficiency
//!
//! Every backend validates that returned vectors match the declared dimension
//! exactly; a mismatch aborts the calling operation rather than silently
//! truncating or padding.

mod http_backend;

pub use http_backend::*;

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Trait for embedding providers
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimension
    fn dimension(&self) -> usize;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Check every vector in a batch against the declared dimension
pub fn validate_dimensions(expected: usize, embeddings: &[Vec<f32>]) -> Result<()> {
    if let Some(mismatch) = embeddings.iter().find(|vec| vec.len() != expected) {
        return Err(Error::EmbeddingDimension {
            expected,
            got: mismatch.len(),
        });
    }
    Ok(())
}

/// Embed a single text, returning its vector
pub async fn embed_one(embedder: &dyn Embedder, text: &str) -> Result<Vec<f32>> {
    let mut vectors = embedder.embed(vec![text.to_string()]).await?;
    vectors
        .pop()
        .ok_or_else(|| Error::Embedding("No embedding returned".to_string()))
}

/// Helper to embed in batches
pub async fn embed_in_batches(
    embedder: &dyn Embedder,
    texts: Vec<String>,
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    let mut all_embeddings = Vec::with_capacity(texts.len());

    for chunk in texts.chunks(batch_size.max(1)) {
        let batch_texts: Vec<String> = chunk.to_vec();
        let embeddings = embedder.embed(batch_texts).await?;
        all_embeddings.extend(embeddings);
    }

    Ok(all_embeddings)
}
