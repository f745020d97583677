use std::sync::Arc;

use crate::config::Config;
use crate::model::Classifier;

/// Shared by every request. The classifier is loaded once at startup and
/// never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(config: Config, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
        }
    }

    pub fn classifier(&self) -> Arc<dyn Classifier> {
        Arc::clone(&self.classifier)
    }
}
