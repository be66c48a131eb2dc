//! Recognizer trait and the no-op fallback.

use textveil_core::{Entity, Result};

/// Trait for named-entity recognition backends.
///
/// Spans returned must be char-boundary byte offsets into the exact text
/// passed in, restricted to the semantic categories
/// (person/organization/location). A backend that cannot serve a request
/// returns an `Error::Recognizer`; callers recover by treating the
/// contribution as empty rather than failing structured detection.
pub trait RecognizerBackend: Send + Sync {
    /// Recognize semantic entity spans in `text`.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;

    /// Whether the backing capability is loaded.
    fn is_available(&self) -> bool;

    /// Short backend name for status reporting.
    fn name(&self) -> &'static str;
}

/// Placeholder recognizer that never produces entities.
///
/// Used when no NER capability is configured; detection then runs on the
/// structured pattern library alone.
pub struct NoopRecognizer;

impl NoopRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognizerBackend for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(Vec::new())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
