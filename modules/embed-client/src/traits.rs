use anyhow::Result;
use async_trait::async_trait;

/// Batch-first embedding interface. Output length and order always match the
/// input; any failure fails the whole batch rather than yielding partial
/// results.
#[async_trait]
pub trait EmbedAgent: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
