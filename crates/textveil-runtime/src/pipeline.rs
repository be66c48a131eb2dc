//! Pipeline: coordinates matchers and the recognizer over one input text.

use std::sync::Arc;

use tracing::{debug, warn};

use textveil_core::{Entity, RedactionRecord, Result, DEFAULT_MASK};
use textveil_recognize::RecognizerBackend;

use crate::types::{DetectOutcome, Redaction, RecognizerStatus};

/// The top-level detection and redaction pipeline.
///
/// Holds the recognizer by handle (constructed once, no global singletons)
/// plus the configured mask. All verbs are synchronous and side-effect free
/// over an immutable input text.
pub struct Pipeline {
    recognizer: Arc<dyn RecognizerBackend>,
    mask: String,
}

impl Pipeline {
    /// Create a pipeline with the default mask.
    pub fn new(recognizer: Arc<dyn RecognizerBackend>) -> Self {
        Self {
            recognizer,
            mask: DEFAULT_MASK.to_string(),
        }
    }

    /// Create a pipeline with an explicit mask.
    pub fn with_mask(recognizer: Arc<dyn RecognizerBackend>, mask: impl Into<String>) -> Self {
        Self {
            recognizer,
            mask: mask.into(),
        }
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn recognizer_name(&self) -> &'static str {
        self.recognizer.name()
    }

    pub fn recognizer_available(&self) -> bool {
        self.recognizer.is_available()
    }

    /// Detect all entities in `text`, in presentation order (start ascending).
    pub fn detect(&self, text: &str) -> Vec<Entity> {
        self.detect_with_status(text).entities
    }

    /// Detect with recognizer health attached, so callers can observe
    /// degradation instead of it being swallowed.
    pub fn detect_with_status(&self, text: &str) -> DetectOutcome {
        let structured = textveil_patterns::scan(text);

        let (semantic, degraded) = match self.recognizer.recognize(text) {
            Ok(mut entities) => {
                // Adapter contract: only semantic categories pass through.
                entities.retain(|e| e.kind.is_semantic());
                (entities, false)
            }
            Err(e) => {
                warn!("Recognizer failed, continuing with patterns only: {}", e);
                (Vec::new(), true)
            }
        };

        let entities = textveil_redact::merge(vec![structured, semantic]);
        debug!("Detected {} entities", entities.len());

        DetectOutcome {
            entities,
            recognizer: RecognizerStatus {
                backend: self.recognizer.name().to_string(),
                available: self.recognizer.is_available(),
                degraded,
            },
        }
    }

    /// Detect and redact `text` with the configured mask.
    pub fn redact(&self, text: &str) -> Result<Redaction> {
        let outcome = self.detect_with_status(text);
        let (redacted, report) = textveil_redact::redact(text, &outcome.entities, &self.mask)?;
        Ok(Redaction {
            text: redacted,
            report,
            recognizer: outcome.recognizer,
        })
    }

    /// Redact caller-supplied entities. `mask` falls back to the configured
    /// one; offsets must reference `text` exactly as passed here.
    pub fn redact_entities(
        &self,
        text: &str,
        entities: &[Entity],
        mask: Option<&str>,
    ) -> Result<(String, Vec<RedactionRecord>)> {
        textveil_redact::redact(text, entities, mask.unwrap_or(&self.mask))
    }
}
