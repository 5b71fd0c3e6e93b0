//! Ingestion pipeline: extract, chunk, embed, index
//!
//! Failures are scoped per input file. One file's failure never aborts the
//! batch; the report carries a success list and a failure list.

use crate::chunk;
use crate::config::Config;
use crate::embed::{embed_in_batches, Embedder};
use crate::error::{Error, Result};
use crate::extract::{extract, Format};
use crate::progress::file_progress;
use crate::store::{ChunkPayload, ChunkPoint, VectorIndex};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// One document to ingest: byte stream, format tag, and description,
/// explicitly paired by the boundary layer.
#[derive(Debug, Clone)]
pub struct IngestInput {
    pub filename: String,
    pub format: Format,
    pub description: String,
    pub bytes: Vec<u8>,
}

/// A successfully ingested file
#[derive(Debug, Clone, Serialize)]
pub struct IngestedFile {
    pub filename: String,
    pub chunks_inserted: usize,
}

/// A file that failed to ingest, with error detail
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub filename: String,
    pub error: String,
}

/// Batch ingestion report
#[derive(Debug, Clone, Serialize, Default)]
pub struct IngestReport {
    pub success: Vec<IngestedFile>,
    pub failed: Vec<FailedFile>,
}

/// Ingest a batch of documents.
///
/// Files are processed concurrently up to `ingest.concurrency`, each running
/// the full extract → chunk → embed → upsert pipeline independently.
pub async fn cmd_ingest(
    config: &Config,
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    inputs: Vec<IngestInput>,
) -> Result<IngestReport> {
    index.ensure_collection().await?;

    let pb = file_progress(inputs.len() as u64);

    let outcomes: Vec<(String, Result<usize>)> = stream::iter(inputs.into_iter().map(|input| {
        let pb = pb.clone();
        async move {
            let filename = input.filename.clone();
            let outcome = ingest_file(config, index, embedder, input).await;
            pb.inc(1);
            (filename, outcome)
        }
    }))
    .buffered(config.ingest.concurrency)
    .collect()
    .await;

    pb.finish_and_clear();

    let mut report = IngestReport::default();
    for (filename, outcome) in outcomes {
        match outcome {
            Ok(chunks_inserted) => {
                info!("Ingested {} ({} chunks)", filename, chunks_inserted);
                report.success.push(IngestedFile {
                    filename,
                    chunks_inserted,
                });
            }
            Err(e) => {
                warn!("Failed to ingest {}: {}", filename, e);
                report.failed.push(FailedFile {
                    filename,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

async fn ingest_file(
    config: &Config,
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    input: IngestInput,
) -> Result<usize> {
    let text = extract(&input.bytes, input.format)?;

    // The description is prepended so it participates in retrieval
    let combined = format!("Description: {}\n\n{}", input.description, text);

    let chunks = chunk::split(&combined, config.chunk.max_chars, config.chunk.overlap_chars);
    if chunks.is_empty() {
        return Err(Error::EmptyContent(format!(
            "'{}' produced no chunks",
            input.filename
        )));
    }

    let vectors = embed_in_batches(embedder, chunks.clone(), config.embedding.batch_size).await?;

    let uploaded_at = Utc::now().to_rfc3339();
    let count = chunks.len();
    let points: Vec<ChunkPoint> = chunks
        .into_iter()
        .zip(vectors)
        .map(|(text, vector)| ChunkPoint {
            id: Uuid::new_v4(),
            vector,
            payload: ChunkPayload::new(
                text,
                input.filename.clone(),
                input.description.clone(),
                uploaded_at.clone(),
            ),
        })
        .collect();

    index.upsert(points).await?;
    Ok(count)
}

/// Print an ingestion report to console
pub fn print_ingest_report(report: &IngestReport) {
    if !report.success.is_empty() {
        println!("\n✓ Ingested {} file(s):", report.success.len());
        for file in &report.success {
            println!("  {} ({} chunks)", file.filename, file.chunks_inserted);
        }
    }

    if !report.failed.is_empty() {
        println!("\n✗ Failed {} file(s):", report.failed.len());
        for file in &report.failed {
            println!("  {}: {}", file.filename, file.error);
        }
    }
}
