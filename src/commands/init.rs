//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{QdrantStore, VectorIndex};
use std::path::PathBuf;
use tracing::info;

/// Initialize docshelf configuration and the vector collection
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let mut config = Config::default();

    let base = base_dir.unwrap_or_else(Config::default_base_dir);
    config.paths.base_dir = base.clone();
    config.paths.config_file = base.join("config.toml");

    if config.paths.config_file.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config.paths.base_dir.display().to_string(),
        ));
    }

    std::fs::create_dir_all(&config.paths.base_dir)?;

    config.validate()?;
    config.save()?;
    info!("Created config at {:?}", config.paths.config_file);

    // Best effort: collection creation can also happen lazily at first ingest
    match QdrantStore::connect(&config).await {
        Ok(store) => match store.ensure_collection().await {
            Ok(_) => info!("Qdrant collection '{}' ready", config.collection_name),
            Err(e) => {
                tracing::warn!(
                    "Could not create Qdrant collection: {}. You can create it later.",
                    e
                );
            }
        },
        Err(e) => {
            tracing::warn!(
                "Could not connect to Qdrant at {}: {}. Make sure Qdrant is running.",
                config.qdrant_url,
                e
            );
        }
    }

    println!("✓ Initialized docshelf at {:?}", config.paths.base_dir);
    println!("\nConfiguration: {:?}", config.paths.config_file);
    println!("\nNext steps:");
    println!("  docshelf ingest report.pdf -d \"Quarterly report\"   # Index a document");
    println!("  docshelf query \"What was revenue?\"                 # Ask a question");

    Ok(())
}
