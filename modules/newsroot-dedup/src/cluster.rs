//! Greedy star clustering over the similarity matrix.
//!
//! Single ascending pass: the lowest-id unclaimed story in a similarity
//! cluster becomes its root, and claims every later unclaimed story whose
//! similarity to the root itself meets the threshold. Clusters are stars
//! centered at the root, NOT transitive closures — if A claims B, a story C
//! similar to B but not to A stays unlinked. Downstream consumers depend on
//! exactly this shape; do not "fix" it with union-find.

use std::collections::HashSet;

use anyhow::{ensure, Result};

use newsroot_common::{Assignment, Story};

use crate::similarity::SimilarityMatrix;

/// Partition the ordered candidate list into duplicate links.
///
/// `stories` must be ordered by ascending id and aligned 1:1 with the matrix
/// rows. The threshold is a closed lower bound: `similarity >= threshold`
/// links. Deterministic for fixed inputs.
pub fn cluster(
    stories: &[Story],
    matrix: &SimilarityMatrix,
    threshold: f64,
) -> Result<Vec<Assignment>> {
    ensure!(
        stories.len() == matrix.len(),
        "candidate list ({}) and similarity matrix ({}) disagree",
        stories.len(),
        matrix.len()
    );

    let mut seen: HashSet<i64> = HashSet::new();
    let mut assignments = Vec::new();

    for i in 0..stories.len() {
        if seen.contains(&stories[i].id) {
            continue;
        }
        let root = &stories[i];
        for j in (i + 1)..stories.len() {
            if seen.contains(&stories[j].id) {
                continue;
            }
            if matrix.get(i, j) >= threshold {
                assignments.push(Assignment {
                    child_id: stories[j].id,
                    root_id: root.id,
                });
                seen.insert(stories[j].id);
            }
        }
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stories(ids: &[i64]) -> Vec<Story> {
        ids.iter()
            .map(|&id| Story {
                id,
                title: None,
                body_text: None,
                root_id: None,
                article_url: None,
            })
            .collect()
    }

    /// Build a matrix from explicit pairwise similarities, 1.0 diagonal.
    fn matrix(n: usize, pairs: &[(usize, usize, f64)]) -> SimilarityMatrix {
        let mut values = vec![0.0_f64; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
        }
        for &(i, j, sim) in pairs {
            values[i * n + j] = sim;
            values[j * n + i] = sim;
        }
        SimilarityMatrix::from_raw(n, values)
    }

    #[test]
    fn links_pairs_above_threshold() {
        let s = stories(&[10, 20, 30]);
        let m = matrix(3, &[(0, 1, 0.95)]);
        let assignments = cluster(&s, &m, 0.8).unwrap();
        assert_eq!(
            assignments,
            vec![Assignment {
                child_id: 20,
                root_id: 10
            }]
        );
    }

    #[test]
    fn lowest_id_becomes_root() {
        let s = stories(&[1, 2, 3]);
        let m = matrix(3, &[(0, 1, 0.9), (0, 2, 0.9), (1, 2, 0.99)]);
        let assignments = cluster(&s, &m, 0.8).unwrap();
        // 2 and 3 both link to 1 even though 2-3 is the strongest edge.
        assert_eq!(assignments.len(), 2);
        for a in &assignments {
            assert_eq!(a.root_id, 1);
            assert!(a.child_id > a.root_id);
        }
    }

    #[test]
    fn star_not_transitive_closure() {
        // A-B and B-C above threshold, A-C below: B links to A, C stays
        // unlinked because B is already claimed and C is only compared
        // against A's row.
        let s = stories(&[1, 2, 3]);
        let m = matrix(3, &[(0, 1, 0.85), (1, 2, 0.85), (0, 2, 0.5)]);
        let assignments = cluster(&s, &m, 0.8).unwrap();
        assert_eq!(
            assignments,
            vec![Assignment {
                child_id: 2,
                root_id: 1
            }]
        );
    }

    #[test]
    fn threshold_is_a_closed_lower_bound() {
        let s = stories(&[1, 2]);

        let exactly_at = matrix(2, &[(0, 1, 0.8)]);
        assert_eq!(cluster(&s, &exactly_at, 0.8).unwrap().len(), 1);

        let just_below = matrix(2, &[(0, 1, 0.8 - 1e-9)]);
        assert!(cluster(&s, &just_below, 0.8).unwrap().is_empty());
    }

    #[test]
    fn no_self_links() {
        let s = stories(&[1, 2, 3]);
        let m = matrix(3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]);
        let assignments = cluster(&s, &m, 0.5).unwrap();
        for a in &assignments {
            assert_ne!(a.child_id, a.root_id);
        }
    }

    #[test]
    fn each_child_assigned_at_most_once() {
        let s = stories(&[1, 2, 3, 4]);
        let m = matrix(4, &[(0, 1, 0.9), (0, 2, 0.9), (2, 3, 0.9)]);
        let assignments = cluster(&s, &m, 0.8).unwrap();
        let mut children: Vec<i64> = assignments.iter().map(|a| a.child_id).collect();
        children.sort_unstable();
        children.dedup();
        assert_eq!(children.len(), assignments.len());
    }

    #[test]
    fn deterministic_across_runs() {
        let s = stories(&[5, 9, 14, 22]);
        let m = matrix(4, &[(0, 2, 0.82), (1, 3, 0.88), (0, 3, 0.81)]);
        let first = cluster(&s, &m, 0.8).unwrap();
        let second = cluster(&s, &m, 0.8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_mismatched_matrix() {
        let s = stories(&[1, 2, 3]);
        let m = matrix(2, &[]);
        assert!(cluster(&s, &m, 0.8).is_err());
    }
}
