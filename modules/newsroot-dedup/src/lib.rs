//! The deduplication engine.
//!
//! One batch run: load top-level stories → build comparable text → vectorize
//! → pairwise cosine matrix → greedy star clustering → link duplicates in one
//! transaction. Stages run strictly in order; the store is only touched at
//! the ends.

pub mod cluster;
pub mod content;
pub mod pipeline;
pub mod similarity;
pub mod vectorizer;

pub use pipeline::DedupPipeline;
pub use vectorizer::{build_vectorizer, EmbeddingVectorizer, HashedVectorizer, Vectorizer};
