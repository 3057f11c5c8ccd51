use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use newsroot_common::{Assignment, NewsrootError, Story};

use crate::StoryStore;

/// In-memory story store for testing. No database required. Thread-safe.
///
/// `fail_next_link` injects a persistence failure into the next
/// `link_duplicates` call; the failed call mutates nothing, matching the
/// all-or-nothing contract of the Postgres implementation.
pub struct MemoryStoryStore {
    stories: Mutex<Vec<Story>>,
    fail_next_link: AtomicBool,
}

impl MemoryStoryStore {
    pub fn new(stories: Vec<Story>) -> Self {
        Self {
            stories: Mutex::new(stories),
            fail_next_link: AtomicBool::new(false),
        }
    }

    /// Arm a one-shot failure for the next `link_duplicates` call.
    pub fn fail_next_link(&self) {
        self.fail_next_link.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all stories (for test assertions).
    pub fn stories(&self) -> Vec<Story> {
        self.stories.lock().unwrap().clone()
    }

    pub fn story(&self, id: i64) -> Option<Story> {
        self.stories.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }
}

#[async_trait]
impl StoryStore for MemoryStoryStore {
    async fn list_top_level(&self) -> Result<Vec<Story>> {
        let mut top_level: Vec<Story> = self
            .stories
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_top_level())
            .cloned()
            .collect();
        top_level.sort_by_key(|s| s.id);
        Ok(top_level)
    }

    async fn link_duplicates(&self, assignments: &[Assignment]) -> Result<usize> {
        if assignments.is_empty() {
            return Ok(0);
        }

        if self.fail_next_link.swap(false, Ordering::SeqCst) {
            return Err(
                NewsrootError::Persistence("injected failure, batch rolled back".into()).into(),
            );
        }

        let mut stories = self.stories.lock().unwrap();

        // Validate the whole batch before touching anything, so a bad
        // assignment rolls back like the Postgres transaction would.
        for assignment in assignments {
            if !stories
                .iter()
                .any(|s| s.id == assignment.child_id && s.is_top_level())
            {
                return Err(NewsrootError::Persistence(format!(
                    "story {} no longer top-level, aborting batch",
                    assignment.child_id
                ))
                .into());
            }
        }

        for assignment in assignments {
            if let Some(child) = stories.iter_mut().find(|s| s.id == assignment.child_id) {
                child.root_id = Some(assignment.root_id);
            }
        }

        Ok(assignments.len())
    }
}
