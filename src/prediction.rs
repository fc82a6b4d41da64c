//! Sentiment prediction for novel text.

mod predictor;
mod shared;

pub use predictor::{PredictionResult, Predictor};
pub use shared::SharedModel;
