//! Textveil Core: entity data model, error taxonomy, configuration.

pub mod config;
pub mod entity;
pub mod error;

pub use config::{TextveilConfig, DEFAULT_MASK};
pub use entity::{Entity, EntityKind, RedactionRecord};
pub use error::{Error, Result};
