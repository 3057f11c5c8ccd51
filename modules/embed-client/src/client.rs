use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::traits::EmbedAgent;
use crate::types::{EmbeddingRequest, EmbeddingResponse};

const VOYAGE_API_URL: &str = "https://api.voyageai.com/v1";

/// Client for an OpenAI-compatible `/embeddings` endpoint (Voyage AI by
/// default). Construct once per process and share by reference; the inner
/// `reqwest::Client` pools connections.
pub struct EmbeddingsClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl EmbeddingsClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            http: reqwest::Client::new(),
            base_url: VOYAGE_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// The embedding model this client sends requests for.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn request(&self, input: serde_json::Value) -> Result<EmbeddingResponse> {
        let url = format!("{}/embeddings", self.base_url);

        let request = EmbeddingRequest {
            model: self.model.clone(),
            input,
        };

        debug!(model = %self.model, "embedding request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Embedding API error ({}): {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EmbedAgent for EmbeddingsClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .request(serde_json::Value::String(text.to_string()))
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| anyhow!("No embedding in response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let input = serde_json::Value::Array(
            texts
                .iter()
                .map(|t| serde_json::Value::String(t.clone()))
                .collect(),
        );

        let response = self.request(input).await?;

        if response.data.len() != texts.len() {
            return Err(anyhow!(
                "Embedding API returned {} vectors for {} inputs",
                response.data.len(),
                texts.len()
            ));
        }

        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }
}
