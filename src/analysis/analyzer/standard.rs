use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::TokenizerKind;
use crate::error::Result;

/// The analyzer used by the featurizer.
///
/// Splits on non-alphanumeric boundaries and lowercases. Stop word removal is
/// off unless requested.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::with_options(TokenizerKind::default(), false)
    }

    /// Create a standard analyzer with the given tokenizer and stop word setting.
    pub fn with_options(tokenizer: TokenizerKind, remove_stop_words: bool) -> Result<Self> {
        let mut analyzer = PipelineAnalyzer::new(tokenizer.build()?)
            .add_filter(Arc::new(LowercaseFilter::new()));
        if remove_stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }

        Ok(StandardAnalyzer {
            inner: analyzer.with_name("standard"),
        })
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
