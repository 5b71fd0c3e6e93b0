//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::QdrantStore;
use serde::Serialize;
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub qdrant_url: String,
    pub collection_name: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub generation_model: String,
    pub qdrant_connected: bool,
    pub collection_exists: bool,
    pub points_count: u64,
}

/// Get system status
pub async fn cmd_status(config: &Config, store: &QdrantStore) -> Result<StatusInfo> {
    info!("Getting status");

    let (qdrant_connected, collection_exists, points_count) = match store.collection_info().await {
        Ok(Some(info)) => (true, true, info.points_count),
        Ok(None) => (true, false, 0),
        Err(e) => {
            tracing::debug!("Qdrant connection error: {:?}", e);
            (false, false, 0)
        }
    };

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        qdrant_url: config.qdrant_url.clone(),
        collection_name: config.collection_name.clone(),
        embedding_model: config.embedding.model.clone(),
        embedding_dimension: config.embedding.dimension,
        generation_model: config.generation.model.clone(),
        qdrant_connected,
        collection_exists,
        points_count,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 docshelf Status\n");
    println!("Configuration: {}", status.config_path);
    println!("\nQdrant:");
    println!("  URL: {}", status.qdrant_url);
    println!("  Collection: {}", status.collection_name);

    let connection_status = if status.qdrant_connected {
        if status.collection_exists {
            "✓ Connected"
        } else {
            "⚠ Connected (collection not created - run 'docshelf ingest' to create)"
        }
    } else {
        "✗ Not connected"
    };
    println!("  Status: {}", connection_status);
    println!("  Points: {}", status.points_count);
    println!(
        "\nEmbedding Model: {} ({} dims)",
        status.embedding_model, status.embedding_dimension
    );
    println!("Generation Model: {}", status.generation_model);
}
