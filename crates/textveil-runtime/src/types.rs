//! Pipeline outcome types.

use serde::{Deserialize, Serialize};

use textveil_core::{Entity, RedactionRecord};

/// Recognizer health attached to every pipeline outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerStatus {
    pub backend: String,
    pub available: bool,
    /// True when the recognizer failed for this call and contributed
    /// nothing. Structured detection still ran.
    pub degraded: bool,
}

/// Result of a detection pass: merged entities in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct DetectOutcome {
    pub entities: Vec<Entity>,
    pub recognizer: RecognizerStatus,
}

/// Result of a full detect-then-redact pass.
#[derive(Debug, Clone, Serialize)]
pub struct Redaction {
    pub text: String,
    pub report: Vec<RedactionRecord>,
    pub recognizer: RecognizerStatus,
}
