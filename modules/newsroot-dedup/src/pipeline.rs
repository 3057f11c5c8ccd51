//! Orchestrates one dedup run, stage by stage.

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use newsroot_common::{NewsrootError, RunOutcome};
use newsroot_store::StoryStore;

use crate::cluster::cluster;
use crate::content::build_contents;
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::Vectorizer;

/// One configured dedup run. Stages execute strictly in order; the store is
/// read once at the start and written once at the end, inside one
/// transaction. Concurrent runs against the same repository are not safe;
/// the caller serializes.
pub struct DedupPipeline<'a> {
    store: &'a dyn StoryStore,
    vectorizer: Box<dyn Vectorizer>,
    threshold: f64,
}

impl<'a> DedupPipeline<'a> {
    /// Fails fast on an out-of-range threshold, before any work begins.
    pub fn new(
        store: &'a dyn StoryStore,
        vectorizer: Box<dyn Vectorizer>,
        threshold: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(NewsrootError::Config(format!(
                "threshold must be in [0, 1], got {threshold}"
            ))
            .into());
        }
        Ok(Self {
            store,
            vectorizer,
            threshold,
        })
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            method = %self.vectorizer.method(),
            threshold = self.threshold,
            "starting deduplication run"
        );

        let stories = self.store.list_top_level().await?;
        if stories.is_empty() {
            info!(%run_id, "no top-level stories found, nothing to deduplicate");
            return Ok(RunOutcome::empty());
        }
        info!(%run_id, candidates = stories.len(), "loaded candidate stories");

        let contents = build_contents(&stories);

        let vectors = self.vectorizer.encode(&contents).await?;
        if vectors.len() != stories.len() {
            return Err(NewsrootError::Input(format!(
                "vectorizer returned {} vectors for {} stories",
                vectors.len(),
                stories.len()
            ))
            .into());
        }
        info!(%run_id, vectors = vectors.len(), "encoded story contents");

        let matrix = SimilarityMatrix::compute(&vectors);
        let assignments = cluster(&stories, &matrix, self.threshold)?;
        info!(%run_id, assignments = assignments.len(), "clustering complete");

        let duplicates_linked = if assignments.is_empty() {
            0
        } else {
            self.store.link_duplicates(&assignments).await?
        };

        info!(
            %run_id,
            stories_considered = stories.len(),
            duplicates_linked,
            "deduplication run complete"
        );

        Ok(RunOutcome {
            stories_considered: stories.len(),
            duplicates_linked,
        })
    }
}
