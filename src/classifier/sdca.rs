//! Stochastic dual coordinate ascent for L2-regularized logistic regression.
//!
//! The intercept is handled as an extra constant feature, so it is
//! regularized together with the weights. Each epoch visits every example
//! once in a seeded random order and applies a closed-form partial step to
//! its dual variable. Training stops once the duality gap drops below the
//! configured tolerance.

use crate::classifier::loss::{binary_entropy, signed};
use crate::classifier::optimizer::{FitOutcome, Optimizer, TrainingSet, seeded_rng};
use crate::classifier::trainer::TrainerConfig;

/// Logistic loss is `1/4`-smooth; the step size uses the inverse.
const SMOOTHNESS: f64 = 4.0;

/// SDCA optimizer.
#[derive(Debug, Clone)]
pub struct SdcaOptimizer {
    l2: f64,
    max_epochs: usize,
    tolerance: f64,
    seed: u64,
}

impl SdcaOptimizer {
    /// Create an optimizer with explicit settings.
    pub fn new(l2: f64, max_epochs: usize, tolerance: f64, seed: u64) -> Self {
        Self {
            l2,
            max_epochs,
            tolerance,
            seed,
        }
    }

    /// Take the relevant settings from a trainer configuration.
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self::new(config.l2, config.max_epochs, config.tolerance, config.seed)
    }

    fn regularizer(&self, weights: &[f64], bias: f64) -> f64 {
        let norm: f64 = weights.iter().map(|w| w * w).sum::<f64>() + bias * bias;
        0.5 * self.l2 * norm
    }

    fn primal(&self, data: &TrainingSet, weights: &[f64], bias: f64) -> f64 {
        data.mean_loss(weights, bias) + self.regularizer(weights, bias)
    }

    fn dual(&self, data: &TrainingSet, alpha: &[f64], weights: &[f64], bias: f64) -> f64 {
        let entropy: f64 = alpha
            .iter()
            .zip(data.labels())
            .map(|(&a, &label)| binary_entropy(a * signed(label)))
            .sum();
        entropy / data.len() as f64 - self.regularizer(weights, bias)
    }
}

impl Optimizer for SdcaOptimizer {
    fn fit(&self, data: &TrainingSet) -> FitOutcome {
        let n = data.len();
        let lambda_n = self.l2 * n as f64;
        let mut rng = seeded_rng(self.seed);

        let mut alpha = vec![0.0; n];
        let mut weights = vec![0.0; data.dimension()];
        let mut bias = 0.0;

        // Step sizes depend only on the row norms.
        let steps: Vec<f64> = data
            .rows()
            .iter()
            .map(|row| {
                let norm = row.squared_norm() + 1.0;
                lambda_n * SMOOTHNESS / (norm + lambda_n * SMOOTHNESS)
            })
            .collect();

        let mut epochs = 0;
        let mut converged = false;
        let mut gap = f64::INFINITY;
        let mut objective = self.primal(data, &weights, bias);

        while epochs < self.max_epochs {
            for i in data.shuffled_order(&mut rng) {
                let row = &data.rows()[i];
                let y = signed(data.labels()[i]);
                let score = row.dot(&weights) + bias;

                // Negative loss derivative at the current score.
                let target = y / (1.0 + (y * score).exp());
                let delta = steps[i] * (target - alpha[i]);
                if delta == 0.0 {
                    continue;
                }

                alpha[i] += delta;
                let scale = delta / lambda_n;
                row.add_scaled_to(&mut weights, scale);
                bias += scale;
            }
            epochs += 1;

            objective = self.primal(data, &weights, bias);
            gap = objective - self.dual(data, &alpha, &weights, bias);
            log::debug!("sdca epoch {epochs}: primal={objective:.6} gap={gap:.3e}");

            if gap <= self.tolerance {
                converged = true;
                break;
            }
        }

        FitOutcome {
            weights,
            bias,
            epochs,
            converged,
            objective,
            stopping_value: gap,
            duality_gap: Some(gap),
        }
    }

    fn name(&self) -> &'static str {
        "sdca"
    }

    fn stopping_criterion(&self) -> &'static str {
        "duality gap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::FeatureVector;

    fn separable() -> TrainingSet {
        let mut rows = Vec::new();
        for i in 0..40 {
            let noise = (i % 5) as f64 * 0.1;
            rows.push((FeatureVector::from_values(vec![1.0, noise, 0.0]), true));
            rows.push((FeatureVector::from_values(vec![0.0, noise, 1.0]), false));
        }
        TrainingSet::new(&rows, 3).unwrap()
    }

    #[test]
    fn test_converges_on_separable_data() {
        let data = separable();
        let outcome = SdcaOptimizer::new(1e-2, 200, 1e-6, 7).fit(&data);

        assert!(outcome.converged);
        assert!(outcome.weights[0] > 0.0);
        assert!(outcome.weights[2] < 0.0);
        assert!(outcome.duality_gap.unwrap() >= -1e-9);
        assert!(outcome.objective < 2.0f64.ln());
    }

    #[test]
    fn test_single_epoch_limit_reports_not_converged() {
        let data = separable();
        let outcome = SdcaOptimizer::new(1e-4, 1, 1e-12, 7).fit(&data);

        assert_eq!(outcome.epochs, 1);
        assert!(!outcome.converged);
        assert!(outcome.weights.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_same_seed_same_weights() {
        let data = separable();
        let a = SdcaOptimizer::new(1e-3, 20, 1e-8, 11).fit(&data);
        let b = SdcaOptimizer::new(1e-3, 20, 1e-8, 11).fit(&data);
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }
}
