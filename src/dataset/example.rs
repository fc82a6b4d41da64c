use serde::{Deserialize, Serialize};

/// A single review text with its sentiment label (`true` = positive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Raw review text.
    pub text: String,
    /// Sentiment label.
    pub label: bool,
}

impl LabeledExample {
    /// Create a new labeled example.
    pub fn new<S: Into<String>>(text: S, label: bool) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Create a positive example.
    pub fn positive<S: Into<String>>(text: S) -> Self {
        Self::new(text, true)
    }

    /// Create a negative example.
    pub fn negative<S: Into<String>>(text: S) -> Self {
        Self::new(text, false)
    }
}
