use serde::{Deserialize, Serialize};

/// Dense feature vector; one entry per vocabulary term.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create an all-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Wrap existing values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Borrow the raw values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the vector, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Iterate over `(index, value)` pairs with a non-zero value.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
    }

    /// Dot product with a weight slice of the same length.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        debug_assert_eq!(self.values.len(), weights.len());
        self.values
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x * w)
            .sum()
    }

    /// Compressed copy holding only the non-zero entries.
    pub fn to_sparse(&self) -> SparseVector {
        let (indices, values) = self.nonzero().unzip();
        SparseVector { indices, values }
    }
}

/// Non-zero entries of a [`FeatureVector`], used by the optimizers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    /// Feature indices in ascending order.
    pub indices: Vec<usize>,
    /// Values aligned with `indices`.
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Dot product with a dense weight slice.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&i, v)| weights[i] * v)
            .sum()
    }

    /// Squared Euclidean norm.
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// `weights += scale * self`.
    pub fn add_scaled_to(&self, weights: &mut [f64], scale: f64) {
        for (&i, v) in self.indices.iter().zip(self.values.iter()) {
            weights[i] += scale * v;
        }
    }
}
