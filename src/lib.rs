//! docshelf: document question answering over a vector store
//!
//! A retrieval-augmented generation pipeline: documents are extracted,
//! chunked, embedded, and indexed in Qdrant; queries are answered by
//! retrieving and cross-encoder reranking the most relevant chunks, then
//! synthesizing a grounded answer with cited sources.
//!
//! The external capabilities (vector store, embedding, reranking, generation)
//! sit behind traits and are replaceable without pipeline changes.

pub mod chunk;
pub mod commands;
pub mod config;
pub mod embed;
pub mod error;
pub mod extract;
pub mod generate;
pub mod progress;
pub mod rerank;
pub mod store;
