use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::dataset::LabeledExample;
use crate::error::Result;
use crate::featurize::config::{FeaturizerConfig, Normalization, TermWeighting};
use crate::featurize::vector::FeatureVector;
use crate::featurize::vocabulary::Vocabulary;

/// Prefix that keeps character n-grams apart from word terms.
const CHAR_NGRAM_PREFIX: char = '#';

/// Build a vocabulary from training examples only.
///
/// Must run before training and must never see test or novel text.
pub fn build_vocabulary(
    examples: &[LabeledExample],
    config: &FeaturizerConfig,
) -> Result<Vocabulary> {
    config.validate()?;
    let analyzer = analyzer_for(config)?;

    let documents = examples
        .iter()
        .map(|example| extract_terms(analyzer.as_ref(), config, &example.text))
        .collect::<Result<Vec<_>>>()?;

    Ok(Vocabulary::from_documents(documents))
}

/// Turns text into fixed-length feature vectors over a bound vocabulary.
///
/// The featurizer is immutable once built. A model keeps the featurizer that
/// produced its training features and uses it for every later prediction.
#[derive(Clone)]
pub struct TextFeaturizer {
    config: FeaturizerConfig,
    vocabulary: Vocabulary,
    /// Per-term idf, present only for [`TermWeighting::TfIdf`].
    idf: Option<Vec<f64>>,
    analyzer: Arc<dyn Analyzer>,
}

impl TextFeaturizer {
    /// Build the vocabulary from `examples` and bind it to a new featurizer.
    pub fn fit(config: FeaturizerConfig, examples: &[LabeledExample]) -> Result<Self> {
        let vocabulary = build_vocabulary(examples, &config)?;
        log::debug!(
            "built vocabulary of {} terms from {} examples",
            vocabulary.len(),
            examples.len()
        );
        Self::new(config, vocabulary)
    }

    /// Bind an existing vocabulary.
    pub fn new(config: FeaturizerConfig, vocabulary: Vocabulary) -> Result<Self> {
        config.validate()?;
        let analyzer = analyzer_for(&config)?;
        let idf = match config.weighting {
            TermWeighting::TfIdf => Some(vocabulary.idf()),
            _ => None,
        };

        Ok(Self {
            config,
            vocabulary,
            idf,
            analyzer,
        })
    }

    /// Featurize a single text.
    ///
    /// Unknown terms are ignored; text without any known term (including the
    /// empty string) yields an all-zero vector of vocabulary length.
    pub fn featurize(&self, text: &str) -> Result<FeatureVector> {
        let mut values = vec![0.0; self.vocabulary.len()];

        for term in extract_terms(self.analyzer.as_ref(), &self.config, text)? {
            if let Some(idx) = self.vocabulary.get(&term) {
                values[idx] += 1.0;
            }
        }

        match self.config.weighting {
            TermWeighting::TermFrequency => {}
            TermWeighting::Binary => {
                for v in values.iter_mut().filter(|v| **v > 0.0) {
                    *v = 1.0;
                }
            }
            TermWeighting::TfIdf => {
                if let Some(idf) = &self.idf {
                    for (v, w) in values.iter_mut().zip(idf.iter()) {
                        *v *= w;
                    }
                }
            }
        }

        if self.config.normalization == Normalization::L2 {
            let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for v in &mut values {
                    *v /= norm;
                }
            }
        }

        Ok(FeatureVector::from_values(values))
    }

    /// Featurize labeled examples in parallel, keeping input order.
    pub fn featurize_examples(
        &self,
        examples: &[LabeledExample],
    ) -> Result<Vec<(FeatureVector, bool)>> {
        examples
            .par_iter()
            .map(|example| Ok((self.featurize(&example.text)?, example.label)))
            .collect()
    }

    /// Length of every vector this featurizer produces.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// The bound vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The featurization settings.
    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }
}

impl std::fmt::Debug for TextFeaturizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFeaturizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

fn analyzer_for(config: &FeaturizerConfig) -> Result<Arc<dyn Analyzer>> {
    Ok(Arc::new(StandardAnalyzer::with_options(
        config.tokenizer,
        config.remove_stop_words,
    )?))
}

/// Word n-grams (joined by a space) followed by optional character n-grams.
fn extract_terms(
    analyzer: &dyn Analyzer,
    config: &FeaturizerConfig,
    text: &str,
) -> Result<Vec<String>> {
    let words: Vec<String> = analyzer.analyze(text)?.map(|token| token.text).collect();
    let mut terms = Vec::with_capacity(words.len() * config.word_ngram_max);

    for n in 1..=config.word_ngram_max {
        for window in words.windows(n) {
            terms.push(window.join(" "));
        }
    }

    if let Some(len) = config.char_ngram {
        for word in &words {
            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for window in padded.windows(len) {
                let mut gram = String::with_capacity(len + 1);
                gram.push(CHAR_NGRAM_PREFIX);
                gram.extend(window.iter());
                terms.push(gram);
            }
        }
    }

    Ok(terms)
}
