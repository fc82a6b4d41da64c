//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline: they split input
//! text into word tokens and drop everything in between.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Runs of letters and digits (the default)
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries (UAX #29)
//!
//! # Examples
//!
//! ```
//! use polarity::analysis::tokenizer::Tokenizer;
//! use polarity::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Wow... Loved this place.").unwrap().collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a trained model (which owns its
/// analyzer) can be shared across prediction threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Selects the tokenizer used by the featurizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Split on non-alphanumeric boundaries.
    #[default]
    Alphanumeric,
    /// Split on Unicode word boundaries, keeping words like "don't" whole.
    UnicodeWord,
}

impl TokenizerKind {
    /// Build the tokenizer for this kind.
    pub fn build(self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerKind::Alphanumeric => Arc::new(regex::RegexTokenizer::new()?),
            TokenizerKind::UnicodeWord => Arc::new(unicode_word::UnicodeWordTokenizer::new()),
        })
    }
}

// Individual tokenizer modules
pub mod regex;
pub mod unicode_word;
