use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{PolarityError, Result};

/// How term occurrences become feature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermWeighting {
    /// Raw occurrence count.
    #[default]
    TermFrequency,
    /// 1.0 when the term occurs at all.
    Binary,
    /// Occurrence count scaled by smoothed inverse document frequency.
    TfIdf,
}

/// Per-vector normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Leave weighted values as they are.
    None,
    /// Scale to unit Euclidean length (zero vectors stay zero).
    #[default]
    L2,
}

/// Configuration for text featurization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturizerConfig {
    /// Tokenizer used to split text into words.
    pub tokenizer: TokenizerKind,
    /// Longest word n-gram to emit (1 = unigrams only).
    pub word_ngram_max: usize,
    /// Length of character n-grams to emit per word, if any.
    pub char_ngram: Option<usize>,
    /// Term weighting scheme.
    pub weighting: TermWeighting,
    /// Vector normalization.
    pub normalization: Normalization,
    /// Remove English stop words (negations are always kept).
    pub remove_stop_words: bool,
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::Alphanumeric,
            word_ngram_max: 2,
            char_ngram: None,
            weighting: TermWeighting::TermFrequency,
            normalization: Normalization::L2,
            remove_stop_words: false,
        }
    }
}

impl FeaturizerConfig {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.word_ngram_max == 0 {
            return Err(PolarityError::invalid_input(
                "word_ngram_max must be at least 1",
            ));
        }
        if self.char_ngram == Some(0) {
            return Err(PolarityError::invalid_input(
                "char_ngram length must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeaturizerConfig::default();
        assert_eq!(config.word_ngram_max, 2);
        assert_eq!(config.weighting, TermWeighting::TermFrequency);
        assert_eq!(config.normalization, Normalization::L2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FeaturizerConfig =
            serde_json::from_str(r#"{"weighting": "tf_idf", "char_ngram": 3}"#).unwrap();
        assert_eq!(config.weighting, TermWeighting::TfIdf);
        assert_eq!(config.char_ngram, Some(3));
        assert_eq!(config.word_ngram_max, 2);
    }

    #[test]
    fn test_validate_rejects_zero_lengths() {
        let config = FeaturizerConfig {
            word_ngram_max: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PolarityError::InvalidInput(_))));

        let config = FeaturizerConfig {
            char_ngram: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
