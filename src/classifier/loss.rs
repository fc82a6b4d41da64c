//! Numerically stable logistic helpers.

/// Probabilities are clamped to `[EPSILON, 1 - EPSILON]` before taking logs.
const PROBABILITY_EPSILON: f64 = 1e-15;

/// The logistic function, evaluated without overflow for large `|value|`.
pub fn sigmoid(value: f64) -> f64 {
    if value >= 0.0 {
        let z = (-value).exp();
        1.0 / (1.0 + z)
    } else {
        let z = value.exp();
        z / (1.0 + z)
    }
}

/// `ln(1 + e^z)` without overflow.
pub(crate) fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Logistic loss of a raw score against a label: `ln(1 + e^{-ỹ·score})`
/// with `ỹ ∈ {-1, +1}`.
pub(crate) fn score_loss(score: f64, label: bool) -> f64 {
    softplus(-signed(label) * score)
}

/// Map a label to `±1`.
pub(crate) fn signed(label: bool) -> f64 {
    if label { 1.0 } else { -1.0 }
}

/// Log-loss (natural log) of a predicted probability against a label.
pub fn log_loss(probability: f64, label: bool) -> f64 {
    let p = probability.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
    if label { -p.ln() } else { -(1.0 - p).ln() }
}

/// Binary entropy `-p ln p - (1-p) ln(1-p)`, with `0 ln 0 = 0`.
pub fn binary_entropy(p: f64) -> f64 {
    let term = |q: f64| if q <= 0.0 { 0.0 } else { -q * q.ln() };
    term(p) + term(1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_stable_and_symmetric() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        for x in [-30.0, -2.5, 0.1, 4.0] {
            assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_score_loss_matches_log_loss() {
        for score in [-3.0, -0.2, 0.0, 1.7] {
            for label in [true, false] {
                let direct = log_loss(sigmoid(score), label);
                assert!((score_loss(score, label) - direct).abs() < 1e-9);
            }
        }
        assert!(score_loss(1000.0, false).is_finite());
    }

    #[test]
    fn test_log_loss_is_clamped() {
        assert!(log_loss(0.0, true).is_finite());
        assert!(log_loss(1.0, false).is_finite());
        assert!((log_loss(0.5, true) - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_binary_entropy() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 2.0f64.ln()).abs() < 1e-12);
    }
}
