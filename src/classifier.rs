//! L2-regularized logistic regression.
//!
//! [`LogisticRegressionTrainer`] fits a linear model `σ(w·x + b)` by
//! minimizing mean log-loss plus `(l2 / 2)·‖w‖²`. The numerical work is
//! delegated to an [`Optimizer`]:
//!
//! - [`SdcaOptimizer`] (default): stochastic dual coordinate ascent, stopping
//!   on the primal/dual gap.
//! - [`SgdOptimizer`]: mini-batch stochastic gradient descent with a decaying
//!   learning rate, stopping on objective improvement.
//!
//! Both visit examples in an order shuffled from a fixed seed, so training is
//! reproducible for a given input order and configuration.

mod artifact;
mod loss;
mod model;
mod optimizer;
mod sdca;
mod sgd;
mod trainer;

pub use artifact::{ModelArtifact, ModelFormat};
pub use loss::{binary_entropy, log_loss, sigmoid};
pub use model::{Model, ModelMetadata};
pub use optimizer::{FitOutcome, Optimizer, OptimizerKind, TrainingSet};
pub use sdca::SdcaOptimizer;
pub use sgd::SgdOptimizer;
pub use trainer::{
    ConvergenceWarning, LinearFit, LogisticRegressionTrainer, TrainerConfig, TrainingReport,
};
