//! Minimal client for OpenAI-compatible embedding APIs.
//!
//! Voyage AI is the default provider; any endpoint speaking the
//! `/embeddings` wire format works via `with_base_url`.

mod client;
pub mod traits;
mod types;

pub use client::EmbeddingsClient;
pub use traits::EmbedAgent;
