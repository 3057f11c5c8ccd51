use serde::{Deserialize, Serialize};

use crate::error::NewsrootError;

// --- Stories ---

/// A collected news story. Only the fields the dedup engine reads; everything
/// else about a story (source, company, entities, timestamps) stays in the
/// repository and is never touched here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub title: Option<String>,
    pub body_text: Option<String>,
    /// Non-null means this story is a duplicate of the referenced root.
    /// Roots themselves always have `root_id = None`; links are single-level.
    pub root_id: Option<i64>,
    /// Carried for log context only.
    pub article_url: Option<String>,
}

impl Story {
    pub fn is_top_level(&self) -> bool {
        self.root_id.is_none()
    }
}

// --- Dedup run types ---

/// One duplicate link produced by clustering: `child_id` becomes a duplicate
/// of `root_id`. The root's own `root_id` stays null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub child_id: i64,
    pub root_id: i64,
}

/// What a single dedup run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub stories_considered: usize,
    pub duplicates_linked: usize,
}

impl RunOutcome {
    pub fn empty() -> Self {
        Self {
            stories_considered: 0,
            duplicates_linked: 0,
        }
    }
}

// --- Vectorization method ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorMethod {
    Hashed,
    Embedding,
}

impl std::fmt::Display for VectorMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorMethod::Hashed => write!(f, "hashed"),
            VectorMethod::Embedding => write!(f, "embedding"),
        }
    }
}

impl std::str::FromStr for VectorMethod {
    type Err = NewsrootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hashed" => Ok(VectorMethod::Hashed),
            "embedding" => Ok(VectorMethod::Embedding),
            other => Err(NewsrootError::Config(format!(
                "unknown vectorization method '{other}' (expected 'hashed' or 'embedding')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_known_values() {
        assert_eq!("hashed".parse::<VectorMethod>().unwrap(), VectorMethod::Hashed);
        assert_eq!(
            "embedding".parse::<VectorMethod>().unwrap(),
            VectorMethod::Embedding
        );
    }

    #[test]
    fn method_rejects_unknown_value() {
        assert!("tfidf".parse::<VectorMethod>().is_err());
    }
}
