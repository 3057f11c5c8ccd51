//! Dense pairwise cosine-similarity matrix.
//!
//! O(n²·d) time, O(n²) memory, computed exactly. Approximate
//! nearest-neighbor structures are out of scope: the clustering must be
//! reproducible, and batches are hundreds to low thousands of stories.

/// Symmetric n×n matrix, flat row-major storage.
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Full pairwise cosine over the vector set. Pure; no side effects.
    pub fn compute(vectors: &[Vec<f32>]) -> Self {
        let n = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(|v| norm(v)).collect();

        let mut values = vec![0.0_f64; n * n];
        for i in 0..n {
            values[i * n + i] = if norms[i] == 0.0 { 0.0 } else { 1.0 };
            for j in (i + 1)..n {
                let sim = if norms[i] == 0.0 || norms[j] == 0.0 {
                    0.0
                } else {
                    dot(&vectors[i], &vectors[j]) / (norms[i] * norms[j])
                };
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        Self { n, values }
    }

    /// Build from precomputed values (row-major, length n²). Test seam; the
    /// pipeline always goes through `compute`.
    pub(crate) fn from_raw(n: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), n * n);
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x * y) as f64).sum()
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (x * x) as f64).sum::<f64>().sqrt()
}
