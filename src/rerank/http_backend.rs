use super::{RerankResult, Reranker};
use crate::config::RerankerConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
struct ScoreResponse {
    results: Vec<ScoredDocument>,
}

/// One scored candidate. Infinity-style servers name the field
/// `relevance_score`; others use plain `score`.
#[derive(Debug, Clone, Deserialize)]
struct ScoredDocument {
    index: usize,
    #[serde(alias = "relevance_score")]
    score: f32,
}

/// Cross-encoder reranking backend (`POST {base}/v1/rerank`)
pub struct HttpReranker {
    client: Client,
    base_url: Url,
    model_id: String,
    api_key: Option<String>,
}

impl HttpReranker {
    pub fn new(config: &RerankerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.backend_url)
            .map_err(|e| Error::Config(format!("Invalid reranker backend URL: {}", e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
            model_id: config.model.clone(),
            api_key: config.api_key(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid reranker backend URL: {}", e)))
    }
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn rerank(&self, query: &str, documents: Vec<String>) -> Result<Vec<RerankResult>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("/v1/rerank")?;
        let request = ScoreRequest {
            model: &self.model_id,
            query,
            documents: &documents,
        };

        let mut builder = self.client.post(url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?.error_for_status()?;
        let parsed = response.json::<ScoreResponse>().await?;

        Ok(parsed
            .results
            .into_iter()
            .map(|doc| RerankResult {
                index: doc.index,
                score: doc.score,
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}
