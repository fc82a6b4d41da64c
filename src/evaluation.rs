//! Binary classification metrics on a held-out set.
//!
//! ```
//! use polarity::evaluation::{ConfusionMatrix, auc};
//!
//! let auc = auc(&[0.9, 0.8, 0.3, 0.1], &[true, true, false, false]).unwrap();
//! assert_eq!(auc, 1.0);
//!
//! let confusion = ConfusionMatrix::from_predictions(&[(true, true), (true, false)]);
//! assert_eq!(confusion.precision(), 0.5);
//! ```

mod metrics;
mod ranking;

use rayon::prelude::*;

use crate::classifier::{Model, sigmoid};
use crate::dataset::LabeledExample;
use crate::error::{PolarityError, Result};
use crate::featurize::FeatureVector;

pub use metrics::{ConfusionMatrix, Metrics};
pub use ranking::{auc, average_precision};

/// Probability threshold for the positive class.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Score featurized rows with `model` and compute [`Metrics`].
///
/// # Errors
///
/// - [`PolarityError::InvalidInput`] when `rows` is empty or contains a
///   single class (AUC is undefined).
/// - [`PolarityError::SchemaMismatch`] when a vector does not match the
///   model's vocabulary.
pub fn evaluate(model: &Model, rows: &[(FeatureVector, bool)]) -> Result<Metrics> {
    if rows.is_empty() {
        return Err(PolarityError::invalid_input("test set is empty"));
    }

    let probabilities = rows
        .par_iter()
        .map(|(features, _)| model.score_features(features).map(sigmoid))
        .collect::<Result<Vec<_>>>()?;
    let labels: Vec<bool> = rows.iter().map(|(_, label)| *label).collect();

    let metrics = Metrics::compute(&probabilities, &labels)?;
    log::debug!(
        "evaluated {} examples: accuracy={:.4} auc={:.4} f1={:.4}",
        rows.len(),
        metrics.accuracy,
        metrics.auc,
        metrics.f1
    );
    Ok(metrics)
}

/// Featurize `examples` with the model's own featurizer, then [`evaluate`].
pub fn evaluate_examples(model: &Model, examples: &[LabeledExample]) -> Result<Metrics> {
    if examples.is_empty() {
        return Err(PolarityError::invalid_input("test set is empty"));
    }
    let rows = model.featurizer().featurize_examples(examples)?;
    evaluate(model, &rows)
}
