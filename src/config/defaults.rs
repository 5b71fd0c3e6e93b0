//! Default values for configuration

/// Default Qdrant gRPC URL for local development (port 6334, not 6333 REST)
pub fn default_qdrant_url() -> String {
    std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://127.0.0.1:6334".to_string())
}

/// Default environment variable name for Qdrant API key
pub fn default_qdrant_api_key_env() -> String {
    "QDRANT_API_KEY".to_string()
}

/// Default collection name
pub fn default_collection_name() -> String {
    "docshelf_docs".to_string()
}

/// Default embedding model
pub fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

/// Default embedding dimension (text-embedding-3-small)
pub fn default_embedding_dimension() -> usize {
    1536
}

/// Default embedding backend URL
pub fn default_embedding_backend_url() -> String {
    std::env::var("DOCSHELF_EMBEDDING_BACKEND_URL")
        .unwrap_or_else(|_| "https://api.openai.com".to_string())
}

/// Default environment variable name for the embedding API key
pub fn default_embedding_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Default batch size for embedding
pub fn default_embedding_batch_size() -> usize {
    32
}

/// Default maximum characters per chunk
pub fn default_chunk_max_chars() -> usize {
    1000
}

/// Default overlap characters between chunks
pub fn default_chunk_overlap() -> usize {
    200
}

/// Default candidate count fetched from the vector store before reranking
pub fn default_candidate_limit() -> usize {
    20
}

/// Default number of chunks kept after reranking
pub fn default_final_k() -> usize {
    10
}

/// Default reranker model (cross-encoder)
pub fn default_reranker_model() -> String {
    "cross-encoder/ms-marco-MiniLM-L-6-v2".to_string()
}

/// Default reranker backend URL
pub fn default_reranker_backend_url() -> String {
    std::env::var("DOCSHELF_RERANKER_BACKEND_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:7997".to_string())
}

/// Default environment variable name for the reranker API key
pub fn default_reranker_api_key_env() -> String {
    "DOCSHELF_RERANKER_API_KEY".to_string()
}

/// Default generation model
pub fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Default generation backend URL
pub fn default_generation_backend_url() -> String {
    std::env::var("DOCSHELF_GENERATION_BACKEND_URL")
        .unwrap_or_else(|_| "https://api.openai.com".to_string())
}

/// Default environment variable name for the generation API key
pub fn default_generation_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Default maximum tokens in a generated answer
pub fn default_generation_max_tokens() -> u32 {
    800
}

/// Default sampling temperature (low, favoring faithfulness to context)
pub fn default_generation_temperature() -> f32 {
    0.3
}

/// Default number of files ingested concurrently
pub fn default_ingest_concurrency() -> usize {
    4
}
