//! Grounded answer generation
//!
//! Assembles the reranked chunk texts into a bounded context string and asks
//! a generation provider to answer only from that context. The provider is a
//! replaceable capability; failures surface as [`Error::Generation`].

mod http_backend;

pub use http_backend::*;

use crate::error::Result;
use async_trait::async_trait;

/// System prompt constraining answers to the supplied context
pub const SYSTEM_PROMPT: &str = "Answer using only provided context.";

/// Trait for generation providers
#[async_trait]
pub trait Generator: Send + Sync {
    /// Complete a system + user prompt pair into answer text
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Join chunk texts into a single context string
pub fn assemble_context(texts: &[String]) -> String {
    texts.join("\n\n")
}

/// Build the grounded user prompt for a query
pub fn build_user_prompt(context: &str, query: &str) -> String {
    format!("Context:\n{}\n\nQuestion:\n{}", context, query)
}
