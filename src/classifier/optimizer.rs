use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::classifier::loss::score_loss;
use crate::classifier::sdca::SdcaOptimizer;
use crate::classifier::sgd::SgdOptimizer;
use crate::classifier::trainer::TrainerConfig;
use crate::error::{PolarityError, Result};
use crate::featurize::{FeatureVector, SparseVector};

/// Validated, sparse training rows shared by every optimizer.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    rows: Vec<SparseVector>,
    labels: Vec<bool>,
    dimension: usize,
}

impl TrainingSet {
    /// Validate labeled vectors against the expected dimension.
    ///
    /// # Errors
    ///
    /// - [`PolarityError::InvalidInput`] when `examples` is empty or a value is not finite.
    /// - [`PolarityError::SchemaMismatch`] when a vector length differs from `dimension`.
    pub fn new(examples: &[(FeatureVector, bool)], dimension: usize) -> Result<Self> {
        if examples.is_empty() {
            return Err(PolarityError::invalid_input("training set is empty"));
        }

        let mut rows = Vec::with_capacity(examples.len());
        let mut labels = Vec::with_capacity(examples.len());
        for (i, (features, label)) in examples.iter().enumerate() {
            if features.len() != dimension {
                return Err(PolarityError::schema_mismatch(format!(
                    "example {i}: feature vector has length {}, vocabulary has {dimension} terms",
                    features.len()
                )));
            }
            if features.values().iter().any(|v| !v.is_finite()) {
                return Err(PolarityError::invalid_input(format!(
                    "example {i}: feature vector contains a non-finite value"
                )));
            }
            rows.push(features.to_sparse());
            labels.push(*label);
        }

        Ok(Self {
            rows,
            labels,
            dimension,
        })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Sparse rows in input order.
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Labels in input order.
    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    /// Number of positive labels.
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l).count()
    }

    /// Mean logistic loss of `(weights, bias)` over the set.
    pub fn mean_loss(&self, weights: &[f64], bias: f64) -> f64 {
        let total: f64 = self
            .rows
            .iter()
            .zip(self.labels.iter())
            .map(|(row, &label)| score_loss(row.dot(weights) + bias, label))
            .sum();
        total / self.len() as f64
    }

    /// A visit order over all rows, reshuffled on every call.
    pub(crate) fn shuffled_order(&self, rng: &mut StdRng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        order
    }
}

/// Seeded generator used for visit orders.
pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Result of a single optimizer run.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// Feature weights.
    pub weights: Vec<f64>,
    /// Intercept.
    pub bias: f64,
    /// Epochs actually run.
    pub epochs: usize,
    /// Whether the stopping criterion was met before the epoch limit.
    pub converged: bool,
    /// Final value of the optimizer's primal objective.
    pub objective: f64,
    /// Value of the stopping statistic when the run ended.
    pub stopping_value: f64,
    /// Primal minus dual objective (dual methods only).
    pub duality_gap: Option<f64>,
}

/// A convex optimizer for the regularized logistic objective.
pub trait Optimizer: Send + Sync {
    /// Fit weights and bias. Never fails on a validated training set.
    fn fit(&self, data: &TrainingSet) -> FitOutcome;

    /// Name used in logs, reports and model metadata.
    fn name(&self) -> &'static str;

    /// Human-readable name of the stopping statistic.
    fn stopping_criterion(&self) -> &'static str;
}

/// Available optimizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Stochastic dual coordinate ascent.
    #[default]
    Sdca,
    /// Mini-batch stochastic gradient descent.
    Sgd,
}

impl OptimizerKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizerKind::Sdca => "sdca",
            OptimizerKind::Sgd => "sgd",
        }
    }

    /// Instantiate the optimizer with settings from `config`.
    pub fn build(self, config: &TrainerConfig) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Sdca => Box::new(SdcaOptimizer::from_config(config)),
            OptimizerKind::Sgd => Box::new(SgdOptimizer::from_config(config)),
        }
    }
}

impl std::fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_set_validation() {
        let err = TrainingSet::new(&[], 3).unwrap_err();
        assert!(matches!(err, PolarityError::InvalidInput(_)));

        let rows = vec![(FeatureVector::zeros(2), true)];
        let err = TrainingSet::new(&rows, 3).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));

        let rows = vec![(FeatureVector::from_values(vec![f64::NAN, 0.0, 0.0]), true)];
        let err = TrainingSet::new(&rows, 3).unwrap_err();
        assert!(matches!(err, PolarityError::InvalidInput(_)));
    }

    #[test]
    fn test_mean_loss_at_origin_is_ln_2() {
        let rows = vec![
            (FeatureVector::from_values(vec![1.0, 0.0]), true),
            (FeatureVector::from_values(vec![0.0, 1.0]), false),
        ];
        let data = TrainingSet::new(&rows, 2).unwrap();

        assert_eq!(data.positives(), 1);
        assert!((data.mean_loss(&[0.0, 0.0], 0.0) - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let rows: Vec<_> = (0..20).map(|_| (FeatureVector::zeros(1), false)).collect();
        let data = TrainingSet::new(&rows, 1).unwrap();
        let mut order = data.shuffled_order(&mut seeded_rng(5));
        order.sort_unstable();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
    }
}
