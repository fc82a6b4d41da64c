use std::sync::Arc;

use parking_lot::RwLock;

use crate::classifier::Model;
use crate::prediction::Predictor;

/// A replaceable, concurrently readable model slot.
///
/// Readers take an `Arc` snapshot and keep using it even if the slot is
/// replaced meanwhile; they never observe a partially built model.
#[derive(Debug, Clone)]
pub struct SharedModel {
    inner: Arc<RwLock<Arc<Model>>>,
}

impl SharedModel {
    pub fn new(model: Model) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(model))),
        }
    }

    /// The current model.
    pub fn snapshot(&self) -> Arc<Model> {
        self.inner.read().clone()
    }

    /// A predictor bound to the current model.
    pub fn predictor(&self) -> Predictor {
        Predictor::new(self.snapshot())
    }

    /// Swap in a new model, returning the previous one.
    pub fn replace(&self, model: Model) -> Arc<Model> {
        let next = Arc::new(model);
        let next_id = next.metadata().model_id;
        let previous = std::mem::replace(&mut *self.inner.write(), next);
        log::info!("replaced model {} with {next_id}", previous.metadata().model_id);
        previous
    }
}
