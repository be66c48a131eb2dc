//! Entity data model: typed spans over an immutable original text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Categories of sensitive spans the engine can detect.
///
/// This is a closed set: anything outside it is rejected at parse time and
/// at the serde boundary, so unknown categories never reach the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Email,
    Phone,
    CreditCard,
    Person,
    Organization,
    Location,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Email => "email",
            EntityKind::Phone => "phone",
            EntityKind::CreditCard => "credit_card",
            EntityKind::Person => "person",
            EntityKind::Organization => "organization",
            EntityKind::Location => "location",
        }
    }

    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Email,
            Self::Phone,
            Self::CreditCard,
            Self::Person,
            Self::Organization,
            Self::Location,
        ]
    }

    /// Kinds produced by the structured pattern library.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Email | Self::Phone | Self::CreditCard)
    }

    /// Kinds produced by the named-entity recognizer.
    pub fn is_semantic(&self) -> bool {
        !self.is_structured()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "credit_card" => Ok(Self::CreditCard),
            "person" => Ok(Self::Person),
            "organization" => Ok(Self::Organization),
            "location" => Ok(Self::Location),
            other => Err(Error::InvalidInput(format!(
                "unknown entity category: {other}"
            ))),
        }
    }
}

/// A detected sensitive span.
///
/// `start..end` is a half-open byte range into the original text, always on
/// char boundaries; `text` equals `&original[start..end]`. Entities are
/// created fresh per detection pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub start: usize,
    pub end: usize,
}

impl Entity {
    pub fn new(text: impl Into<String>, kind: EntityKind, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            start,
            end,
        }
    }

    /// Build an entity from a window of `source`, copying the matched text.
    ///
    /// Callers must pass char-boundary offsets; matchers built on `regex`
    /// and validated tokenizer offsets always do.
    pub fn from_span(source: &str, kind: EntityKind, start: usize, end: usize) -> Self {
        Self {
            text: source[start..end].to_string(),
            kind,
            start,
            end,
        }
    }

    /// Byte length of the original span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One entry of a redaction report: what was removed and from where.
///
/// Offsets reference the original text, not the redacted copy. Report order
/// reflects processing order (descending end offset), not document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionRecord {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub start: usize,
    pub end: usize,
}

impl RedactionRecord {
    pub fn for_entity(entity: &Entity) -> Self {
        Self {
            text: entity.text.clone(),
            kind: entity.kind,
            start: entity.start,
            end: entity.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_round_trip() {
        for kind in EntityKind::all() {
            assert_eq!(kind.label().parse::<EntityKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "ssn".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&EntityKind::CreditCard).unwrap();
        assert_eq!(json, "\"credit_card\"");
        let err = serde_json::from_str::<EntityKind>("\"passport\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_entity_from_span() {
        let text = "mail me at a@b.com please";
        let entity = Entity::from_span(text, EntityKind::Email, 11, 18);
        assert_eq!(entity.text, "a@b.com");
        assert_eq!(&text[entity.start..entity.end], entity.text);
        assert_eq!(entity.len(), 7);
    }
}
