//! # Polarity
//!
//! Binary sentiment classification for short texts.
//!
//! ## Features
//!
//! - Tokenizer and filter based text analysis
//! - Word and character n-gram featurization over a training vocabulary
//! - L2-regularized logistic regression (SDCA or mini-batch SGD)
//! - Accuracy, AUC, F1 and calibrated binary metrics
//! - Single, batch and parallel prediction
//! - JSON and bincode model persistence
//!
//! ```no_run
//! use polarity::pipeline::{Pipeline, PipelineConfig};
//! use polarity::prediction::Predictor;
//! use std::sync::Arc;
//!
//! let outcome = Pipeline::new(PipelineConfig::default()).run()?;
//! println!("accuracy: {:.2}", outcome.metrics.accuracy);
//!
//! let predictor = Predictor::new(Arc::new(outcome.model));
//! let result = predictor.predict("This was a very bad steak")?;
//! println!("{} ({:.3})", result.sentiment(), result.probability);
//! # Ok::<(), polarity::error::PolarityError>(())
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod featurize;
pub mod pipeline;
pub mod prediction;

pub mod prelude {
    pub use crate::classifier::{LogisticRegressionTrainer, Model, OptimizerKind, TrainerConfig};
    pub use crate::dataset::{LabeledExample, load_examples, split};
    pub use crate::error::{PolarityError, Result};
    pub use crate::evaluation::{Metrics, evaluate, evaluate_examples};
    pub use crate::featurize::{FeatureVector, FeaturizerConfig, TextFeaturizer};
    pub use crate::pipeline::{Pipeline, PipelineConfig};
    pub use crate::prediction::{PredictionResult, Predictor, SharedModel};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
