//! Mini-batch stochastic gradient descent with a decaying learning rate.
//!
//! The step size after `t` mini-batches is `η₀ / (1 + decay · t)`. The L2
//! penalty shrinks the weights on every step; the intercept is not
//! penalized. Training stops once the epoch-to-epoch change of the
//! objective falls below the tolerance.

use crate::classifier::loss::sigmoid;
use crate::classifier::optimizer::{FitOutcome, Optimizer, TrainingSet, seeded_rng};
use crate::classifier::trainer::TrainerConfig;

/// SGD optimizer.
#[derive(Debug, Clone)]
pub struct SgdOptimizer {
    l2: f64,
    max_epochs: usize,
    tolerance: f64,
    learning_rate: f64,
    decay: f64,
    batch_size: usize,
    seed: u64,
}

impl SgdOptimizer {
    /// Take the relevant settings from a trainer configuration.
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self {
            l2: config.l2,
            max_epochs: config.max_epochs,
            tolerance: config.tolerance,
            learning_rate: config.learning_rate,
            decay: config.learning_rate_decay,
            batch_size: config.batch_size.max(1),
            seed: config.seed,
        }
    }

    fn objective(&self, data: &TrainingSet, weights: &[f64], bias: f64) -> f64 {
        let norm: f64 = weights.iter().map(|w| w * w).sum();
        data.mean_loss(weights, bias) + 0.5 * self.l2 * norm
    }
}

impl Optimizer for SgdOptimizer {
    fn fit(&self, data: &TrainingSet) -> FitOutcome {
        let mut rng = seeded_rng(self.seed);
        let mut weights = vec![0.0; data.dimension()];
        let mut bias = 0.0;
        let mut gradient = vec![0.0; data.dimension()];

        let mut step = 0usize;
        let mut epochs = 0;
        let mut converged = false;
        let mut objective = self.objective(data, &weights, bias);
        let mut change = f64::INFINITY;

        while epochs < self.max_epochs {
            let order = data.shuffled_order(&mut rng);
            for batch in order.chunks(self.batch_size) {
                let rate = self.learning_rate / (1.0 + self.decay * step as f64);
                let scale = 1.0 / batch.len() as f64;

                gradient.iter_mut().for_each(|g| *g = 0.0);
                let mut bias_gradient = 0.0;
                for &i in batch {
                    let row = &data.rows()[i];
                    let target = if data.labels()[i] { 1.0 } else { 0.0 };
                    let residual = sigmoid(row.dot(&weights) + bias) - target;
                    row.add_scaled_to(&mut gradient, residual * scale);
                    bias_gradient += residual * scale;
                }

                let shrink = (1.0 - rate * self.l2).max(0.0);
                for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                    *w = *w * shrink - rate * g;
                }
                bias -= rate * bias_gradient;
                step += 1;
            }
            epochs += 1;

            let next = self.objective(data, &weights, bias);
            change = (objective - next).abs();
            objective = next;
            log::debug!("sgd epoch {epochs}: objective={objective:.6} change={change:.3e}");

            if change < self.tolerance {
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
            stopping_value: change,
            duality_gap: None,
        }
    }

    fn name(&self) -> &'static str {
        "sgd"
    }

    fn stopping_criterion(&self) -> &'static str {
        "objective change"
    }
}
