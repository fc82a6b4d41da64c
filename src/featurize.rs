//! Text featurization: vocabulary construction and n-gram feature vectors.
//!
//! A [`Vocabulary`] is built exactly once from the training texts and then
//! travels, inside a [`TextFeaturizer`], with every model trained on its
//! features. Test and novel texts are mapped through the same vocabulary;
//! terms it has never seen are ignored.
//!
//! # Example
//!
//! ```
//! use polarity::dataset::LabeledExample;
//! use polarity::featurize::{FeaturizerConfig, TextFeaturizer};
//!
//! let examples = vec![
//!     LabeledExample::positive("Loved the pasta"),
//!     LabeledExample::negative("Hated the service"),
//! ];
//! let featurizer = TextFeaturizer::fit(FeaturizerConfig::default(), &examples).unwrap();
//!
//! let features = featurizer.featurize("loved it").unwrap();
//! assert_eq!(features.len(), featurizer.dimension());
//! assert!(featurizer.featurize("").unwrap().is_zero());
//! ```

mod config;
mod featurizer;
mod vector;
mod vocabulary;

pub use config::{FeaturizerConfig, Normalization, TermWeighting};
pub use featurizer::{TextFeaturizer, build_vocabulary};
pub use vector::{FeatureVector, SparseVector};
pub use vocabulary::Vocabulary;
