//! Textveil Recognize: named-entity recognition behind a single adapter.
//!
//! The `RecognizerBackend` trait abstracts over span-producing NER.
//! Implementations:
//! - `OnnxRecognizer`: token-classification model via ONNX Runtime
//!   (requires the `onnx` feature and model files on disk)
//! - `HeuristicRecognizer`: regex heuristics, always available
//! - `NoopRecognizer`: returns nothing, signals an absent capability
//!
//! Only `person`, `organization`, and `location` entities leave this crate;
//! anything else a backend produces is filtered before it reaches the
//! merger.

pub mod heuristic;
pub mod onnx_recognizer;
pub mod recognizer;

pub use heuristic::HeuristicRecognizer;
pub use recognizer::{NoopRecognizer, RecognizerBackend};

#[cfg(feature = "onnx")]
pub use onnx_recognizer::OnnxRecognizer;

use std::path::Path;
use std::sync::Arc;

/// Create the best available recognizer for the given model directory.
///
/// Tries ONNX first (if the feature is enabled and model files are present),
/// falls back to the heuristic backend.
pub fn create_recognizer(model_dir: &Path) -> Arc<dyn RecognizerBackend> {
    #[cfg(feature = "onnx")]
    {
        match OnnxRecognizer::load(model_dir) {
            Ok(recognizer) => {
                tracing::info!("Using ONNX recognizer ({} labels)", recognizer.label_count());
                return Arc::new(recognizer);
            }
            Err(e) => {
                tracing::warn!(
                    "ONNX recognizer unavailable: {}. Falling back to heuristics.",
                    e
                );
            }
        }
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = model_dir;
        tracing::info!("ONNX feature disabled. Using heuristic recognizer.");
    }

    Arc::new(HeuristicRecognizer::new())
}
