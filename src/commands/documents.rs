//! Document listing and deletion
//!
//! Documents are a virtual grouping over stored chunks: the listing is
//! derived by aggregating distinct filenames from chunk payloads, and
//! deleting a document is a cascading delete by filename filter.

use crate::error::Result;
use crate::store::VectorIndex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// A logical document, reconstructed from chunk metadata
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub description: String,
    pub uploaded_at: String,
}

/// List all documents in the corpus
pub async fn cmd_list_documents(index: &dyn VectorIndex) -> Result<Vec<DocumentInfo>> {
    info!("Listing documents");

    let payloads = index.scroll_payloads().await?;

    let mut seen = HashSet::new();
    let mut documents = Vec::new();
    for payload in payloads {
        if payload.filename.is_empty() || !seen.insert(payload.filename.clone()) {
            continue;
        }
        documents.push(DocumentInfo {
            filename: payload.filename,
            description: payload.description,
            uploaded_at: payload.uploaded_at,
        });
    }

    Ok(documents)
}

/// Delete a document and all its chunks. Unknown filenames are a no-op.
pub async fn cmd_delete_document(index: &dyn VectorIndex, filename: &str) -> Result<()> {
    info!("Deleting document {}", filename);
    index.delete_by_filename(filename).await
}

/// Print the document listing to console
pub fn print_documents(documents: &[DocumentInfo]) {
    if documents.is_empty() {
        println!("No documents indexed. Use 'docshelf ingest' to add some.");
        return;
    }

    println!("\n{} document(s):\n", documents.len());
    for doc in documents {
        println!("• {}", doc.filename);
        if !doc.description.is_empty() {
            println!("  Description: {}", doc.description);
        }
        if !doc.uploaded_at.is_empty() {
            println!("  Uploaded: {}", doc.uploaded_at);
        }
    }
}
