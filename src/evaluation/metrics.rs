use serde::{Deserialize, Serialize};

use crate::classifier::{binary_entropy, log_loss};
use crate::error::{PolarityError, Result};
use crate::evaluation::DECISION_THRESHOLD;
use crate::evaluation::ranking::{auc, average_precision};

/// Counts of `(predicted, actual)` outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

/// `a / b`, or 0 when `b` is 0.
fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 { 0.0 } else { a as f64 / b as f64 }
}

impl ConfusionMatrix {
    /// Tally `(predicted, actual)` pairs.
    pub fn from_predictions(pairs: &[(bool, bool)]) -> Self {
        let mut matrix = Self::default();
        for &(predicted, actual) in pairs {
            match (predicted, actual) {
                (true, true) => matrix.true_positive += 1,
                (true, false) => matrix.false_positive += 1,
                (false, false) => matrix.true_negative += 1,
                (false, true) => matrix.false_negative += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Positive precision; 0 when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// Positive recall; 0 when there are no positives.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn negative_precision(&self) -> f64 {
        ratio(self.true_negative, self.true_negative + self.false_negative)
    }

    pub fn negative_recall(&self) -> f64 {
        ratio(self.true_negative, self.true_negative + self.false_positive)
    }

    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

/// Quality of a binary classifier on a labeled set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Area under the ROC curve.
    pub auc: f64,
    /// F1 score of the positive class.
    pub f1: f64,
    /// Area under the precision-recall curve.
    pub auprc: f64,
    pub positive_precision: f64,
    pub positive_recall: f64,
    pub negative_precision: f64,
    pub negative_recall: f64,
    /// Mean log-loss of the predicted probabilities.
    pub log_loss: f64,
    /// Relative improvement of `log_loss` over `entropy`.
    pub log_loss_reduction: f64,
    /// Log-loss of always predicting the label prior.
    pub entropy: f64,
    pub confusion: ConfusionMatrix,
}

impl Metrics {
    /// Compute all metrics from predicted probabilities and true labels.
    ///
    /// Fails with [`PolarityError::InvalidInput`] for empty or one-class
    /// input.
    pub fn compute(probabilities: &[f64], labels: &[bool]) -> Result<Self> {
        if probabilities.len() != labels.len() {
            return Err(PolarityError::schema_mismatch(format!(
                "{} probabilities for {} labels",
                probabilities.len(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(PolarityError::invalid_input("test set is empty"));
        }

        let auc = auc(probabilities, labels)?;
        let auprc = average_precision(probabilities, labels)?;

        let pairs: Vec<(bool, bool)> = probabilities
            .iter()
            .zip(labels.iter())
            .map(|(&p, &label)| (p >= DECISION_THRESHOLD, label))
            .collect();
        let confusion = ConfusionMatrix::from_predictions(&pairs);

        let n = labels.len() as f64;
        let log_loss = probabilities
            .iter()
            .zip(labels.iter())
            .map(|(&p, &label)| log_loss(p, label))
            .sum::<f64>()
            / n;
        let prior = labels.iter().filter(|&&l| l).count() as f64 / n;
        let entropy = binary_entropy(prior);
        let log_loss_reduction = if entropy > 0.0 {
            (entropy - log_loss) / entropy
        } else {
            0.0
        };

        Ok(Self {
            accuracy: confusion.accuracy(),
            auc,
            f1: confusion.f1(),
            auprc,
            positive_precision: confusion.precision(),
            positive_recall: confusion.recall(),
            negative_precision: confusion.negative_precision(),
            negative_recall: confusion.negative_recall(),
            log_loss,
            log_loss_reduction,
            entropy,
            confusion,
        })
    }
}
