//! Trained logistic-regression model.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::artifact::{FORMAT_VERSION, ModelArtifact};
use crate::classifier::loss::sigmoid;
use crate::error::{PolarityError, Result};
use crate::featurize::{FeatureVector, TextFeaturizer, Vocabulary};

/// Provenance of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Unique model identifier.
    pub model_id: Uuid,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Optimizer that produced the weights.
    pub optimizer: String,
    /// Trainer hyperparameters.
    pub hyperparameters: BTreeMap<String, f64>,
}

impl ModelMetadata {
    /// Metadata for a model trained just now.
    pub fn new(
        training_examples: usize,
        optimizer: &str,
        hyperparameters: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            training_examples,
            optimizer: optimizer.to_string(),
            hyperparameters,
        }
    }
}

/// Weights, intercept and the featurizer they were trained against.
///
/// Immutable after construction, so a model can be shared across threads
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Model {
    weights: Vec<f64>,
    bias: f64,
    featurizer: TextFeaturizer,
    metadata: ModelMetadata,
}

impl Model {
    /// Bind weights to a featurizer.
    ///
    /// Fails with [`PolarityError::SchemaMismatch`] unless there is exactly
    /// one weight per vocabulary term.
    pub fn new(
        weights: Vec<f64>,
        bias: f64,
        featurizer: TextFeaturizer,
        metadata: ModelMetadata,
    ) -> Result<Self> {
        if weights.len() != featurizer.dimension() {
            return Err(PolarityError::schema_mismatch(format!(
                "model has {} weights but the vocabulary has {} terms",
                weights.len(),
                featurizer.dimension()
            )));
        }
        Ok(Self {
            weights,
            bias,
            featurizer,
            metadata,
        })
    }

    /// Raw score `w·x + b` of a feature vector.
    pub fn score_features(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(PolarityError::schema_mismatch(format!(
                "feature vector has length {}, model expects {}",
                features.len(),
                self.weights.len()
            )));
        }
        Ok(features.dot(&self.weights) + self.bias)
    }

    /// Raw score of a text, featurized with the bound featurizer.
    pub fn score_text(&self, text: &str) -> Result<f64> {
        let features = self.featurizer.featurize(text)?;
        self.score_features(&features)
    }

    /// Probability that `text` is positive.
    pub fn probability(&self, text: &str) -> Result<f64> {
        Ok(sigmoid(self.score_text(text)?))
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn featurizer(&self) -> &TextFeaturizer {
        &self.featurizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.featurizer.vocabulary()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// The `k` terms with the largest positive and the `k` with the most
    /// negative weights, strongest first.
    pub fn strongest_terms(&self, k: usize) -> (Vec<(&str, f64)>, Vec<(&str, f64)>) {
        let mut ranked: Vec<(&str, f64)> = self
            .vocabulary()
            .terms()
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let positive = ranked.iter().filter(|(_, w)| *w > 0.0).take(k).copied().collect();
        let negative = ranked
            .iter()
            .rev()
            .filter(|(_, w)| *w < 0.0)
            .take(k)
            .copied()
            .collect();
        (positive, negative)
    }

    /// Snapshot the model into its persisted form.
    pub fn to_artifact(&self) -> ModelArtifact {
        let vocabulary = self.vocabulary();
        ModelArtifact {
            format_version: FORMAT_VERSION,
            metadata: self.metadata.clone(),
            featurizer: self.featurizer.config().clone(),
            terms: vocabulary.terms().to_vec(),
            document_frequency: vocabulary.document_frequencies().to_vec(),
            n_documents: vocabulary.n_documents(),
            weights: self.weights.clone(),
            bias: self.bias,
        }
    }

    /// Rebuild a model, including its analyzer, from an artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let vocabulary = Vocabulary::from_parts(
            artifact.terms,
            artifact.document_frequency,
            artifact.n_documents,
        )?;
        let featurizer = TextFeaturizer::new(artifact.featurizer, vocabulary)?;
        Self::new(artifact.weights, artifact.bias, featurizer, artifact.metadata)
    }

    /// Save to `path`; `.json` and `.bin` are supported.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_artifact().write(path.as_ref())?;
        log::info!("saved model {} to {}", self.metadata.model_id, path.as_ref().display());
        Ok(())
    }

    /// Load a model written by [`Model::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let model = Self::from_artifact(ModelArtifact::read(path.as_ref())?)?;
        log::debug!(
            "loaded model {} ({} terms) from {}",
            model.metadata.model_id,
            model.weights.len(),
            path.as_ref().display()
        );
        Ok(model)
    }
}
