//! Story repository: the only component that talks to Postgres.
//!
//! `StoryStore` is the seam the dedup engine depends on; `PgStoryStore` is
//! the production implementation, `MemoryStoryStore` the test double.

mod memory;
mod pg;

use anyhow::Result;
use async_trait::async_trait;

use newsroot_common::{Assignment, Story};

pub use memory::MemoryStoryStore;
pub use pg::PgStoryStore;

#[async_trait]
pub trait StoryStore: Send + Sync {
    /// All top-level stories (`root_id IS NULL`), ordered by ascending id.
    /// The ordering is load-bearing: the lowest-id member of each similarity
    /// cluster becomes its root.
    async fn list_top_level(&self) -> Result<Vec<Story>>;

    /// Apply every assignment as one atomic unit: either all child `root_id`
    /// fields are updated or none are. Only `root_id` is mutated. Returns
    /// the number of stories linked.
    async fn link_duplicates(&self, assignments: &[Assignment]) -> Result<usize>;
}
