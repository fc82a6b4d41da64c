//! End-to-end training run: load, split, featurize, train, evaluate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::{LogisticRegressionTrainer, Model, TrainerConfig, TrainingReport};
use crate::dataset::{LabeledExample, load_examples, split};
use crate::error::{PolarityError, Result};
use crate::evaluation::{Metrics, evaluate};
use crate::featurize::{FeaturizerConfig, TextFeaturizer};

/// Default location of the sample corpus.
pub const DEFAULT_DATA_PATH: &str = "data/yelp_labelled.txt";

/// Settings for a complete training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tab-separated `<text>\t<label>` corpus.
    pub data_path: PathBuf,
    /// Fraction of examples held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the train/test split.
    pub seed: u64,
    pub featurizer: FeaturizerConfig,
    pub trainer: TrainerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            test_fraction: 0.2,
            seed: 42,
            featurizer: FeaturizerConfig::default(),
            trainer: TrainerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON configuration; missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PolarityError::from_io_at(e, path))?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check every parameter range.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PolarityError::invalid_input(format!(
                "test_fraction must lie in (0, 1), got {}",
                self.test_fraction
            )));
        }
        self.featurizer.validate()?;
        self.trainer.validate()
    }
}

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub model: Model,
    pub report: TrainingReport,
    /// Metrics on the held-out split.
    pub metrics: Metrics,
    pub train_size: usize,
    pub test_size: usize,
}

/// Runs a [`PipelineConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the corpus from `data_path` and [`Pipeline::run_on`] it.
    pub fn run(&self) -> Result<PipelineOutcome> {
        self.config.validate()?;
        log::info!("loading examples from {}", self.config.data_path.display());
        let examples = load_examples(&self.config.data_path)?;
        self.run_on(&examples)
    }

    /// Split, build the vocabulary on the training part only, train, and
    /// evaluate on the held-out part.
    pub fn run_on(&self, examples: &[LabeledExample]) -> Result<PipelineOutcome> {
        self.config.validate()?;

        let parts = split(examples, self.config.test_fraction, self.config.seed)?;
        log::info!(
            "split {} examples into {} train / {} test (seed {})",
            examples.len(),
            parts.train.len(),
            parts.test.len(),
            self.config.seed
        );
        if parts.train.is_empty() || parts.test.is_empty() {
            return Err(PolarityError::invalid_input(format!(
                "{} examples are too few for test_fraction {}",
                examples.len(),
                self.config.test_fraction
            )));
        }

        let featurizer = TextFeaturizer::fit(self.config.featurizer.clone(), &parts.train)?;
        log::info!("built vocabulary of {} terms", featurizer.dimension());

        let trainer = LogisticRegressionTrainer::new(self.config.trainer.clone())?;
        let (model, report) = trainer.train_model(featurizer, &parts.train)?;

        let test_rows = model.featurizer().featurize_examples(&parts.test)?;
        let metrics = evaluate(&model, &test_rows)?;
        log::info!(
            "held-out accuracy={:.4} auc={:.4} f1={:.4}",
            metrics.accuracy,
            metrics.auc,
            metrics.f1
        );

        Ok(PipelineOutcome {
            model,
            report,
            metrics,
            train_size: parts.train.len(),
            test_size: parts.test.len(),
        })
    }
}
