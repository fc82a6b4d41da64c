//! Text analysis for featurization.
//!
//! Raw review text flows through a [`Tokenizer`](tokenizer::Tokenizer), then a
//! chain of [`Filter`](token_filter::Filter)s, wrapped up by an
//! [`Analyzer`](analyzer::Analyzer). The featurizer only ever sees the final
//! lowercase token stream.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
