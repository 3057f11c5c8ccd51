use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use newsroot_common::{Config, VectorMethod};
use newsroot_dedup::{build_vectorizer, DedupPipeline};
use newsroot_dedup::vectorizer::{DEFAULT_EMBEDDING_MODEL, DEFAULT_HASHED_DIMENSION};
use newsroot_store::PgStoryStore;

/// Link near-duplicate stories to a single canonical root story.
#[derive(Parser, Debug)]
#[command(name = "newsroot-dedup")]
struct Args {
    /// Vectorization method: 'hashed' or 'embedding'.
    #[arg(long, default_value = "hashed")]
    method: String,

    /// Similarity threshold in [0, 1]; pairs at or above it are linked.
    #[arg(long, default_value_t = 0.8)]
    threshold: f64,

    /// Vector dimension for the hashed method.
    #[arg(long, default_value_t = DEFAULT_HASHED_DIMENSION)]
    dimension: usize,

    /// Embedding model id for the embedding method.
    #[arg(long, default_value = DEFAULT_EMBEDDING_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("newsroot_dedup=info".parse()?)
                .add_directive("newsroot_store=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let method: VectorMethod = args.method.parse()?;

    info!(%method, threshold = args.threshold, "Newsroot dedup starting...");

    // The Voyage key is only required when embeddings are in play.
    let config = match method {
        VectorMethod::Hashed => Config::hashed_from_env(),
        VectorMethod::Embedding => Config::from_env(),
    };

    let store = PgStoryStore::connect(&config.database_url).await?;
    let vectorizer = build_vectorizer(method, &config, args.dimension, &args.model)?;

    let pipeline = DedupPipeline::new(&store, vectorizer, args.threshold)?;
    let outcome = pipeline.run().await?;

    info!(
        stories_considered = outcome.stories_considered,
        duplicates_linked = outcome.duplicates_linked,
        "Deduplication complete"
    );

    Ok(())
}
