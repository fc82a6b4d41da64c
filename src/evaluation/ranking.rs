//! Threshold-free ranking metrics.

use std::cmp::Ordering;

use crate::error::{PolarityError, Result};

fn check(scores: &[f64], labels: &[bool]) -> Result<(usize, usize)> {
    if scores.len() != labels.len() {
        return Err(PolarityError::schema_mismatch(format!(
            "{} scores for {} labels",
            scores.len(),
            labels.len()
        )));
    }
    if scores.is_empty() {
        return Err(PolarityError::invalid_input("test set is empty"));
    }
    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(PolarityError::invalid_input(
            "AUC is undefined: the test set must contain both positive and negative examples",
        ));
    }
    Ok((positives, negatives))
}

/// Indices of `scores`, sorted by `order`.
fn sorted_indices(scores: &[f64], order: impl Fn(f64, f64) -> Ordering) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| order(scores[a], scores[b]));
    indices
}

/// Area under the ROC curve (Mann–Whitney U with average ranks for ties).
///
/// The probability that a random positive is scored above a random
/// negative, counting ties as one half.
pub fn auc(scores: &[f64], labels: &[bool]) -> Result<f64> {
    let (positives, negatives) = check(scores, labels)?;
    let order = sorted_indices(scores, |a, b| a.total_cmp(&b));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // Ranks start..end (1-based start+1..=end) share their mean.
        let rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = order[start..end].iter().filter(|&&i| labels[i]).count();
        positive_rank_sum += rank * tied_positives as f64;
        start = end;
    }

    let p = positives as f64;
    let u = positive_rank_sum - p * (p + 1.0) / 2.0;
    Ok(u / (p * negatives as f64))
}

/// Area under the precision-recall curve as average precision.
///
/// Tied scores are treated as one threshold.
pub fn average_precision(scores: &[f64], labels: &[bool]) -> Result<f64> {
    let (positives, _) = check(scores, labels)?;
    let order = sorted_indices(scores, |a, b| b.total_cmp(&a));

    let mut true_positives = 0usize;
    let mut seen = 0usize;
    let mut ap = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        let tied_positives = order[start..end].iter().filter(|&&i| labels[i]).count();
        true_positives += tied_positives;
        seen += end - start;

        if tied_positives > 0 {
            let precision = true_positives as f64 / seen as f64;
            ap += precision * tied_positives as f64 / positives as f64;
        }
        start = end;
    }
    Ok(ap)
}
