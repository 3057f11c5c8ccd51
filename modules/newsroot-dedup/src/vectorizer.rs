//! Text → fixed-dimension vectors, two interchangeable strategies.
//!
//! The hashed vectorizer is pure and needs no model or corpus; the embedding
//! vectorizer calls out to an OpenAI-compatible embedding API. Both keep
//! output length and order identical to the input, and both fail the whole
//! batch on any error rather than returning partial results.

use anyhow::Result;
use async_trait::async_trait;

use embed_client::{EmbedAgent, EmbeddingsClient};
use newsroot_common::{Config, NewsrootError, VectorMethod};

pub const DEFAULT_HASHED_DIMENSION: usize = 4096;
pub const DEFAULT_EMBEDDING_MODEL: &str = "voyage-3-large";

#[async_trait]
pub trait Vectorizer: Send + Sync {
    fn method(&self) -> VectorMethod;

    /// Encode a batch of texts. Output has the same length and order as the
    /// input; no partial failures.
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

// ---------------------------------------------------------------------------
// HashedVectorizer
// ---------------------------------------------------------------------------

/// Sparse hashed term-frequency vectors: lowercase whitespace tokens bucketed
/// by a deterministic hash into a fixed dimension. Counts are non-negative
/// (no sign alternation), so cosine similarity stays in [0, 1]. No training,
/// no I/O, no corpus state.
pub struct HashedVectorizer {
    dimension: usize,
}

impl HashedVectorizer {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut counts = vec![0.0_f32; self.dimension];
        for token in text.split_whitespace() {
            let bucket = token_bucket(&token.to_lowercase(), self.dimension);
            counts[bucket] += 1.0;
        }
        counts
    }
}

impl Default for HashedVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_HASHED_DIMENSION)
    }
}

/// Fast deterministic token hash for bucketing. Not cryptographic.
fn token_bucket(token: &str, dimension: usize) -> usize {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    token.hash(&mut hasher);
    (hasher.finish() % dimension as u64) as usize
}

#[async_trait]
impl Vectorizer for HashedVectorizer {
    fn method(&self) -> VectorMethod {
        VectorMethod::Hashed
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

// ---------------------------------------------------------------------------
// EmbeddingVectorizer
// ---------------------------------------------------------------------------

/// Dense semantic vectors from a pretrained sentence encoder behind an
/// OpenAI-compatible API. Dimension is fixed by the model; values may be
/// negative, so cosine similarity lies in [-1, 1].
pub struct EmbeddingVectorizer {
    client: EmbeddingsClient,
}

impl EmbeddingVectorizer {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: EmbeddingsClient::new(api_key, model),
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

#[async_trait]
impl Vectorizer for EmbeddingVectorizer {
    fn method(&self) -> VectorMethod {
        VectorMethod::Embedding
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        // One batched call; model-load and request overhead amortize across
        // the whole candidate set.
        self.client
            .embed_batch(texts)
            .await
            .map_err(|e| NewsrootError::Input(format!("embedding batch failed: {e}")).into())
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build the vectorizer once from run configuration; the pipeline never
/// branches on the method again.
pub fn build_vectorizer(
    method: VectorMethod,
    config: &Config,
    hashed_dimension: usize,
    embedding_model: &str,
) -> Result<Box<dyn Vectorizer>> {
    match method {
        VectorMethod::Hashed => {
            if hashed_dimension == 0 {
                return Err(
                    NewsrootError::Config("hashed dimension must be positive".into()).into(),
                );
            }
            Ok(Box::new(HashedVectorizer::new(hashed_dimension)))
        }
        VectorMethod::Embedding => {
            if config.voyage_api_key.is_empty() {
                return Err(NewsrootError::Config(
                    "VOYAGE_API_KEY is required for the embedding method".into(),
                )
                .into());
            }
            Ok(Box::new(EmbeddingVectorizer::new(
                &config.voyage_api_key,
                embedding_model,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn encode(v: &HashedVectorizer, texts: &[&str]) -> Vec<Vec<f32>> {
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        v.encode(&texts).await.unwrap()
    }

    #[tokio::test]
    async fn hashed_is_deterministic() {
        let v = HashedVectorizer::new(256);
        let a = encode(&v, &["city council votes on housing"]).await;
        let b = encode(&v, &["city council votes on housing"]).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn hashed_has_fixed_dimension() {
        let v = HashedVectorizer::new(128);
        let vectors = encode(&v, &["one", "two words", ""]).await;
        assert_eq!(vectors.len(), 3);
        for vector in &vectors {
            assert_eq!(vector.len(), 128);
        }
    }

    #[tokio::test]
    async fn hashed_counts_are_non_negative() {
        let v = HashedVectorizer::new(64);
        let vectors = encode(&v, &["a b c a b a"]).await;
        assert!(vectors[0].iter().all(|&x| x >= 0.0));
        assert_eq!(vectors[0].iter().sum::<f32>(), 6.0);
    }

    #[tokio::test]
    async fn hashed_folds_case() {
        let v = HashedVectorizer::new(512);
        let vectors = encode(&v, &["Mayor Resigns", "mayor resigns"]).await;
        assert_eq!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn hashed_empty_text_is_zero_vector() {
        let v = HashedVectorizer::new(32);
        let vectors = encode(&v, &["   "]).await;
        assert!(vectors[0].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn factory_rejects_zero_dimension() {
        let config = Config {
            database_url: String::new(),
            voyage_api_key: String::new(),
        };
        assert!(build_vectorizer(VectorMethod::Hashed, &config, 0, "m").is_err());
    }

    #[test]
    fn factory_requires_api_key_for_embeddings() {
        let config = Config {
            database_url: String::new(),
            voyage_api_key: String::new(),
        };
        assert!(build_vectorizer(VectorMethod::Embedding, &config, 4096, "m").is_err());
    }
}
