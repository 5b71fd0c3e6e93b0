//! Query pipeline: embed, retrieve, rerank, answer
//!
//! An empty candidate set short-circuits with [`Error::NoResults`] before any
//! rerank or generation call. Provider faults during answer synthesis surface
//! as [`Error::Generation`], a distinct outcome.

use crate::config::Config;
use crate::embed::{embed_one, Embedder};
use crate::error::{Error, Result};
use crate::generate::{assemble_context, build_user_prompt, Generator, SYSTEM_PROMPT};
use crate::rerank::{order_results, RerankResult, Reranker};
use crate::store::{SearchFilter, VectorIndex};
use serde::Serialize;
use tracing::{debug, info};

/// A source citation: the document a context chunk came from, with its
/// rerank score
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub filename: String,
    pub rerank_score: f32,
}

/// Generated answer with its provenance trail
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Answer a natural-language query from the indexed corpus.
///
/// `target_files`, when non-empty, restricts retrieval to chunks whose source
/// filename is in the set.
pub async fn cmd_query(
    config: &Config,
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    reranker: &dyn Reranker,
    generator: &dyn Generator,
    query: &str,
    target_files: Option<Vec<String>>,
) -> Result<QueryAnswer> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyContent("query text is required".to_string()));
    }

    info!("Querying: {}", query);

    let query_vector = embed_one(embedder, query).await?;

    let filter = target_files
        .filter(|files| !files.is_empty())
        .map(SearchFilter::new);

    let hits = index
        .search(query_vector, filter, config.search.candidate_limit)
        .await?;
    debug!("Got {} candidates from the vector store", hits.len());

    if hits.is_empty() {
        return Err(Error::NoResults);
    }

    let documents: Vec<String> = hits.iter().map(|h| h.payload.text.clone()).collect();
    let scored = reranker.rerank(query, documents).await?;

    let ordered = if scored.is_empty() {
        // Backend returned nothing to reorder by; keep retrieval order
        hits.iter()
            .take(config.search.final_k)
            .enumerate()
            .map(|(index, hit)| RerankResult {
                index,
                score: hit.score,
            })
            .collect()
    } else {
        order_results(scored, config.search.final_k)
    };

    let mut texts = Vec::with_capacity(ordered.len());
    let mut sources = Vec::with_capacity(ordered.len());
    for result in &ordered {
        if let Some(hit) = hits.get(result.index) {
            texts.push(hit.payload.text.clone());
            sources.push(SourceRef {
                filename: hit.payload.filename.clone(),
                rerank_score: result.score,
            });
        }
    }

    let context = assemble_context(&texts);
    let user_prompt = build_user_prompt(&context, query);
    let answer = generator.complete(SYSTEM_PROMPT, &user_prompt).await?;

    info!("Answered from {} context chunks", sources.len());

    Ok(QueryAnswer {
        answer: answer.trim().to_string(),
        sources,
    })
}

/// Print a query answer to console
pub fn print_answer(result: &QueryAnswer) {
    println!("\n{}\n", result.answer);

    if !result.sources.is_empty() {
        println!("Sources:");
        for source in &result.sources {
            println!("  [{:.3}] {}", source.rerank_score, source.filename);
        }
    }
}
