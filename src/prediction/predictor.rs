use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::{Model, sigmoid};
use crate::error::Result;
use crate::evaluation::DECISION_THRESHOLD;

/// Prediction for one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The input text.
    pub text: String,
    /// `true` for positive sentiment.
    pub predicted_label: bool,
    /// Probability of positive sentiment.
    pub probability: f64,
    /// Raw linear score `w·x + b`.
    pub score: f64,
}

impl PredictionResult {
    /// "Positive" or "Negative".
    pub fn sentiment(&self) -> &'static str {
        if self.predicted_label {
            "Positive"
        } else {
            "Negative"
        }
    }
}

/// Scores text with a trained model.
///
/// Always featurizes with the model's own vocabulary and never mutates the
/// model, so one predictor can serve many threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: Arc<Model>,
}

impl Predictor {
    pub fn new(model: Arc<Model>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Predict the sentiment of one text.
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        let score = self.model.score_text(text)?;
        let probability = sigmoid(score);
        Ok(PredictionResult {
            text: text.to_string(),
            predicted_label: probability >= DECISION_THRESHOLD,
            probability,
            score,
        })
    }

    /// Predict each text in order.
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<PredictionResult>> {
        texts.iter().map(|text| self.predict(text.as_ref())).collect()
    }

    /// Same as [`Predictor::predict_batch`], spread over the rayon pool.
    pub fn predict_batch_parallel<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Result<Vec<PredictionResult>> {
        texts
            .par_iter()
            .map(|text| self.predict(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LogisticRegressionTrainer, TrainerConfig};
    use crate::dataset::LabeledExample;
    use crate::featurize::{FeaturizerConfig, TextFeaturizer};

    fn love_hate_model() -> Arc<Model> {
        let objects = ["this", "it", "the food", "the place", "our waiter"];
        let mut examples = Vec::new();
        for i in 0..50 {
            let object = objects[i % objects.len()];
            examples.push(LabeledExample::positive(format!("I love {object}")));
            examples.push(LabeledExample::negative(format!("I hate {object}")));
        }
        let featurizer = TextFeaturizer::fit(FeaturizerConfig::default(), &examples).unwrap();
        let (model, _) = LogisticRegressionTrainer::new(TrainerConfig::default())
            .unwrap()
            .train_model(featurizer, &examples)
            .unwrap();
        Arc::new(model)
    }

    #[test]
    fn test_unseen_phrase_follows_known_sentiment() {
        let predictor = Predictor::new(love_hate_model());

        let result = predictor.predict("I love that").unwrap();
        assert!(result.predicted_label);
        assert!(result.probability > 0.5);
        assert_eq!(result.sentiment(), "Positive");

        let result = predictor.predict("I hate that").unwrap();
        assert!(!result.predicted_label);
        assert_eq!(result.sentiment(), "Negative");
    }

    #[test]
    fn test_prediction_is_deterministic_and_bounded() {
        let predictor = Predictor::new(love_hate_model());
        for text in ["I love this", "", "completely unrelated words", "HATE!!!"] {
            let a = predictor.predict(text).unwrap();
            let b = predictor.predict(text).unwrap();
            assert_eq!(a, b);
            assert!((0.0..=1.0).contains(&a.probability));
            assert_eq!(a.predicted_label, a.probability >= 0.5);
        }
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let predictor = Predictor::new(love_hate_model());
        let texts = ["I hate it", "I love it", "I hate the place", "I love our waiter"];

        let sequential = predictor.predict_batch(&texts).unwrap();
        let parallel = predictor.predict_batch_parallel(&texts).unwrap();

        assert_eq!(sequential, parallel);
        let labels: Vec<bool> = sequential.iter().map(|r| r.predicted_label).collect();
        assert_eq!(labels, vec![false, true, false, true]);
        assert_eq!(sequential[1].text, "I love it");
    }
}
