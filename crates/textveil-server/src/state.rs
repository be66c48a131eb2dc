//! Shared application state.

use std::sync::Arc;

use textveil_core::TextveilConfig;
use textveil_recognize::RecognizerBackend;
use textveil_runtime::Pipeline;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TextveilConfig,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: TextveilConfig, recognizer: Arc<dyn RecognizerBackend>) -> Self {
        let pipeline = Pipeline::with_mask(recognizer, config.mask.clone());
        Self { config, pipeline }
    }
}
