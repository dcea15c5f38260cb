//! Cosine similarity over embedding vectors.

/// Cosine similarity between two vectors of equal length.
///
/// Returns `0.0` when either vector has zero norm. Never returns `-0.0`, so
/// equal scores also compare equal under `total_cmp`.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimensionality");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // `+ 0.0` folds a negative zero into positive zero.
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0) + 0.0
}

/// Square, symmetric matrix of pairwise cosine similarities with a unit
/// diagonal. Stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities. Each pair is computed once and
    /// mirrored, so the result is exactly symmetric.
    #[must_use]
    pub fn from_embeddings(embeddings: &[Vec<f32>]) -> Self {
        let size = embeddings.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            values[i * size + i] = 1.0;
            for j in (i + 1)..size {
                let sim = cosine_similarity(&embeddings[i], &embeddings[j]);
                values[i * size + j] = sim;
                values[j * size + i] = sim;
            }
        }

        Self { size, values }
    }

    /// Build from hand-written rows.
    ///
    /// Returns `None` unless `rows` is square.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[Vec<f32>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.size && j < self.size, "index out of bounds");
        self.values[i * self.size + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let sim = cosine_similarity(&[0.3, 0.4], &[0.3, 0.4]);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_have_similarity_minus_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);
        assert!((sim + 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn zero_vector_has_similarity_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let embeddings = vec![vec![1.0, 0.0], vec![0.6, 0.8], vec![0.0, 0.0]];
        let m = SimilarityMatrix::from_embeddings(&embeddings);
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1) - 0.6).abs() < 1e-6);
        assert_eq!(m.get(0, 2), 0.0);
    }

    #[test]
    fn orthogonal_with_negative_zero_terms_is_positive_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-0.0, -1.0]);
        assert_eq!(sim.to_bits(), 0.0_f32.to_bits(), "got {sim:?}");
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(SimilarityMatrix::from_rows(&[vec![1.0, 0.5], vec![0.5]]).is_none());
        assert!(SimilarityMatrix::from_rows(&[vec![1.0]]).is_some());
    }
}
