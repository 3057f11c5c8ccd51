use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use newsroot_common::{Assignment, NewsrootError, Story};

use crate::StoryStore;

/// Postgres-backed story repository.
pub struct PgStoryStore {
    pool: PgPool,
}

impl PgStoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| NewsrootError::Persistence(format!("connect failed: {e}")))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StoryStore for PgStoryStore {
    async fn list_top_level(&self) -> Result<Vec<Story>> {
        let rows = sqlx::query_as::<_, (i64, Option<String>, Option<String>, Option<String>)>(
            r#"
            SELECT id, title, body_text, article_url
            FROM stories
            WHERE root_id IS NULL
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NewsrootError::Persistence(format!("list_top_level failed: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(id, title, body_text, article_url)| Story {
                id,
                title,
                body_text,
                root_id: None,
                article_url,
            })
            .collect())
    }

    async fn link_duplicates(&self, assignments: &[Assignment]) -> Result<usize> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| NewsrootError::Persistence(format!("begin failed: {e}")))?;

        for assignment in assignments {
            let result = sqlx::query(
                r#"
                UPDATE stories
                SET root_id = $1
                WHERE id = $2 AND root_id IS NULL
                "#,
            )
            .bind(assignment.root_id)
            .bind(assignment.child_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                NewsrootError::Persistence(format!(
                    "update root_id failed for story {}: {e}",
                    assignment.child_id
                ))
            })?;

            if result.rows_affected() != 1 {
                // The candidate set changed under us (story deleted or linked
                // by another run). Abort rather than persist a partial graph.
                return Err(NewsrootError::Persistence(format!(
                    "story {} no longer top-level, aborting batch",
                    assignment.child_id
                ))
                .into());
            }

            debug!(
                child_id = assignment.child_id,
                root_id = assignment.root_id,
                "linked duplicate"
            );
        }

        tx.commit()
            .await
            .map_err(|e| NewsrootError::Persistence(format!("commit failed: {e}")))?;

        Ok(assignments.len())
    }
}
