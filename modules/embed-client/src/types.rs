use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct EmbeddingRequest {
    pub model: String,
    /// A single string or an array of strings, per the OpenAI wire format.
    pub input: serde_json::Value,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingData {
    pub embedding: Vec<f32>,
}
