//! Configuration from environment variables and defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sentinel substituted for every redacted span unless a caller overrides it.
pub const DEFAULT_MASK: &str = "[REDACTED]";

/// Top-level Textveil configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextveilConfig {
    /// HTTP server port.
    pub port: u16,
    /// Mask string spliced over detected spans.
    pub mask: String,
    /// Directory holding the optional NER model files.
    pub model_dir: PathBuf,
}

impl TextveilConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3900);

        let mask = std::env::var("TEXTVEIL_MASK")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MASK.to_string());

        let model_dir = std::env::var("TEXTVEIL_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("models"));

        Self {
            port,
            mask,
            model_dir,
        }
    }
}

impl Default for TextveilConfig {
    fn default() -> Self {
        Self {
            port: 3900,
            mask: DEFAULT_MASK.to_string(),
            model_dir: PathBuf::from("models"),
        }
    }
}
