//! L2-regularized logistic regression training.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::classifier::model::{Model, ModelMetadata};
use crate::classifier::optimizer::{OptimizerKind, TrainingSet};
use crate::dataset::LabeledExample;
use crate::error::{PolarityError, Result};
use crate::featurize::{FeatureVector, TextFeaturizer};

/// Trainer hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Optimizer used to fit the weights.
    pub optimizer: OptimizerKind,
    /// L2 regularization strength.
    pub l2: f64,
    /// Maximum passes over the training set.
    pub max_epochs: usize,
    /// Convergence threshold for the optimizer's stopping statistic.
    pub tolerance: f64,
    /// Initial SGD step size.
    pub learning_rate: f64,
    /// SGD step-size decay per mini-batch.
    pub learning_rate_decay: f64,
    /// SGD mini-batch size.
    pub batch_size: usize,
    /// Seed for the per-epoch visit order.
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerKind::Sdca,
            l2: 1e-3,
            max_epochs: 100,
            tolerance: 1e-4,
            learning_rate: 0.5,
            learning_rate_decay: 0.01,
            batch_size: 16,
            seed: 42,
        }
    }
}

impl TrainerConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.l2.is_finite() && self.l2 > 0.0) {
            return Err(PolarityError::invalid_input(format!(
                "l2 must be positive, got {}",
                self.l2
            )));
        }
        if self.max_epochs == 0 {
            return Err(PolarityError::invalid_input("max_epochs must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PolarityError::invalid_input(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PolarityError::invalid_input(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.learning_rate_decay.is_finite() && self.learning_rate_decay >= 0.0) {
            return Err(PolarityError::invalid_input(format!(
                "learning_rate_decay must be non-negative, got {}",
                self.learning_rate_decay
            )));
        }
        if self.batch_size == 0 {
            return Err(PolarityError::invalid_input("batch_size must be at least 1"));
        }
        Ok(())
    }

    /// Hyperparameters recorded in model metadata.
    pub fn hyperparameters(&self) -> BTreeMap<String, f64> {
        let mut params = BTreeMap::new();
        params.insert("l2".to_string(), self.l2);
        params.insert("max_epochs".to_string(), self.max_epochs as f64);
        params.insert("tolerance".to_string(), self.tolerance);
        if self.optimizer == OptimizerKind::Sgd {
            params.insert("learning_rate".to_string(), self.learning_rate);
            params.insert("learning_rate_decay".to_string(), self.learning_rate_decay);
            params.insert("batch_size".to_string(), self.batch_size as f64);
        }
        params
    }
}

/// The optimizer hit its epoch limit before meeting its stopping criterion.
///
/// Not an error: the partially optimized weights are still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error(
    "{optimizer} did not converge after {epochs} epochs ({criterion} {value:.3e} > tolerance {tolerance:.3e})"
)]
pub struct ConvergenceWarning {
    /// Optimizer name.
    pub optimizer: String,
    /// Epochs run.
    pub epochs: usize,
    /// Stopping statistic name.
    pub criterion: String,
    /// Final value of the stopping statistic.
    pub value: f64,
    /// Required threshold.
    pub tolerance: f64,
}

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Optimizer name.
    pub optimizer: String,
    /// Number of training examples.
    pub examples: usize,
    /// Epochs run.
    pub epochs: usize,
    /// Whether the stopping criterion was met.
    pub converged: bool,
    /// Final primal objective.
    pub final_objective: f64,
    /// Final duality gap (SDCA only).
    pub duality_gap: Option<f64>,
    /// Wall-clock training time.
    pub elapsed_ms: u64,
    /// Present when the epoch limit was reached first.
    pub warning: Option<ConvergenceWarning>,
}

/// Weights, intercept and report from [`LogisticRegressionTrainer::train`].
#[derive(Debug, Clone)]
pub struct LinearFit {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub report: TrainingReport,
}

/// Fits `p(y = 1 | x) = σ(w·x + b)` by minimizing mean log-loss plus
/// `(l2 / 2)·‖w‖²`.
#[derive(Debug, Clone)]
pub struct LogisticRegressionTrainer {
    config: TrainerConfig,
}

impl LogisticRegressionTrainer {
    /// Create a trainer after validating `config`.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The trainer settings.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit weights on already featurized rows.
    ///
    /// The dimension is taken from the first row; every other row must match.
    pub fn train(&self, rows: &[(FeatureVector, bool)]) -> Result<LinearFit> {
        let dimension = rows.first().map(|(x, _)| x.len()).unwrap_or(0);
        self.fit(&TrainingSet::new(rows, dimension)?)
    }

    /// Featurize `examples` with `featurizer`, train, and bind the result
    /// into a [`Model`].
    pub fn train_model(
        &self,
        featurizer: TextFeaturizer,
        examples: &[LabeledExample],
    ) -> Result<(Model, TrainingReport)> {
        if examples.is_empty() {
            return Err(PolarityError::invalid_input("training set is empty"));
        }
        let rows = featurizer.featurize_examples(examples)?;
        self.train_featurized(featurizer, &rows)
    }

    /// Train on rows produced by `featurizer` and bind the result into a
    /// [`Model`].
    pub fn train_featurized(
        &self,
        featurizer: TextFeaturizer,
        rows: &[(FeatureVector, bool)],
    ) -> Result<(Model, TrainingReport)> {
        let data = TrainingSet::new(rows, featurizer.dimension())?;
        let fit = self.fit(&data)?;

        let metadata = ModelMetadata::new(
            data.len(),
            &fit.report.optimizer,
            self.config.hyperparameters(),
        );
        let model = Model::new(fit.weights, fit.bias, featurizer, metadata)?;
        Ok((model, fit.report))
    }

    fn fit(&self, data: &TrainingSet) -> Result<LinearFit> {
        let optimizer = self.config.optimizer.build(&self.config);
        log::info!(
            "training {} on {} examples ({} positive), {} features",
            optimizer.name(),
            data.len(),
            data.positives(),
            data.dimension()
        );

        let start = Instant::now();
        let outcome = optimizer.fit(data);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let warning = (!outcome.converged).then(|| ConvergenceWarning {
            optimizer: optimizer.name().to_string(),
            epochs: outcome.epochs,
            criterion: optimizer.stopping_criterion().to_string(),
            value: outcome.stopping_value,
            tolerance: self.config.tolerance,
        });
        match &warning {
            Some(w) => log::warn!("{w}"),
            None => log::info!(
                "{} converged after {} epochs in {elapsed_ms} ms",
                optimizer.name(),
                outcome.epochs
            ),
        }

        if outcome.weights.iter().any(|w| !w.is_finite()) || !outcome.bias.is_finite() {
            return Err(PolarityError::other(format!(
                "{} produced non-finite weights",
                optimizer.name()
            )));
        }

        let report = TrainingReport {
            optimizer: optimizer.name().to_string(),
            examples: data.len(),
            epochs: outcome.epochs,
            converged: outcome.converged,
            final_objective: outcome.objective,
            duality_gap: outcome.duality_gap,
            elapsed_ms,
            warning,
        };

        Ok(LinearFit {
            weights: outcome.weights,
            bias: outcome.bias,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::FeaturizerConfig;

    fn corpus() -> Vec<LabeledExample> {
        let mut examples = Vec::new();
        for i in 0..30 {
            examples.push(LabeledExample::positive(format!("good food number {i}")));
            examples.push(LabeledExample::negative(format!("bad food number {i}")));
        }
        examples
    }

    fn train_with(optimizer: OptimizerKind) -> (Model, TrainingReport) {
        let examples = corpus();
        let featurizer = TextFeaturizer::fit(FeaturizerConfig::default(), &examples).unwrap();
        let config = TrainerConfig {
            optimizer,
            max_epochs: 500,
            ..TrainerConfig::default()
        };
        LogisticRegressionTrainer::new(config)
            .unwrap()
            .train_model(featurizer, &examples)
            .unwrap()
    }

    #[test]
    fn test_both_optimizers_separate_good_and_bad() {
        for kind in [OptimizerKind::Sdca, OptimizerKind::Sgd] {
            let (model, report) = train_with(kind);
            assert_eq!(report.optimizer, kind.as_str());
            assert_eq!(report.examples, 60);
            assert!(model.probability("good").unwrap() > 0.5, "{kind}");
            assert!(model.probability("bad").unwrap() < 0.5, "{kind}");
        }
    }

    #[test]
    fn test_empty_training_set_is_invalid() {
        let trainer = LogisticRegressionTrainer::new(TrainerConfig::default()).unwrap();
        let err = trainer.train(&[]).unwrap_err();
        assert!(matches!(err, PolarityError::InvalidInput(_)));
    }

    #[test]
    fn test_length_mismatch_is_schema_error() {
        let trainer = LogisticRegressionTrainer::new(TrainerConfig::default()).unwrap();
        let rows = vec![
            (FeatureVector::from_values(vec![1.0, 0.0]), true),
            (FeatureVector::from_values(vec![1.0]), false),
        ];
        let err = trainer.train(&rows).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));
    }

    #[test]
    fn test_epoch_limit_warns_but_returns_weights() {
        let config = TrainerConfig {
            max_epochs: 1,
            tolerance: 1e-12,
            ..TrainerConfig::default()
        };
        let trainer = LogisticRegressionTrainer::new(config).unwrap();
        let rows: Vec<_> = (0..20)
            .map(|i| (FeatureVector::from_values(vec![1.0, (i % 3) as f64]), i % 2 == 0))
            .collect();

        let fit = trainer.train(&rows).unwrap();
        let warning = fit.report.warning.expect("expected a convergence warning");
        assert_eq!(warning.epochs, 1);
        assert!(!fit.report.converged);
        assert_eq!(fit.weights.len(), 2);
        assert!(warning.to_string().contains("did not converge"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        for config in [
            TrainerConfig {
                l2: 0.0,
                ..TrainerConfig::default()
            },
            TrainerConfig {
                max_epochs: 0,
                ..TrainerConfig::default()
            },
            TrainerConfig {
                batch_size: 0,
                ..TrainerConfig::default()
            },
        ] {
            let err = LogisticRegressionTrainer::new(config).unwrap_err();
            assert!(matches!(err, PolarityError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: TrainerConfig =
            serde_json::from_str(r#"{"optimizer": "sgd", "l2": 0.01}"#).unwrap();
        assert_eq!(config.optimizer, OptimizerKind::Sgd);
        assert_eq!(config.l2, 0.01);
        assert_eq!(config.max_epochs, 100);
    }
}
