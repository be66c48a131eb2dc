//! Heuristic named-entity recognition with spans.
//!
//! Regex heuristics for persons (title + name, consecutive capitalized
//! words), organizations (corporate suffix), and locations (preposition
//! cues). Always available; precision is intentionally modest.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use textveil_core::{Entity, EntityKind, Result};

use crate::recognizer::RecognizerBackend;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)").unwrap()
});

static NAME_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").unwrap());

static ORG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:Inc\.|Corp\.|LLC|Ltd\.|Co\.)").unwrap()
});

static LOCATION_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:in|at|near|from)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\b").unwrap()
});

// Capitalized words that follow a location cue without naming a place.
const CUE_STOPWORDS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December", "Monday", "Tuesday",
    "Wednesday", "Thursday", "Friday", "Saturday", "Sunday", "The",
];

/// Regex-based recognizer producing person/organization/location spans.
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognizerBackend for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let mut seen: HashSet<(usize, usize, EntityKind)> = HashSet::new();
        let mut entities: Vec<Entity> = Vec::new();

        let push = |entities: &mut Vec<Entity>,
                    seen: &mut HashSet<(usize, usize, EntityKind)>,
                    kind: EntityKind,
                    start: usize,
                    end: usize| {
            if start < end && seen.insert((start, end, kind)) {
                entities.push(Entity::from_span(text, kind, start, end));
            }
        };

        // Title + name persons.
        for cap in TITLE_RE.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                push(&mut entities, &mut seen, EntityKind::Person, m.start(), m.end());
            }
        }

        // Two consecutive capitalized words (likely a name). Skip matches at
        // the very start of the text (likely a sentence opener, not a name).
        for m in NAME_PAIR_RE.find_iter(text) {
            if m.start() > 2 {
                push(&mut entities, &mut seen, EntityKind::Person, m.start(), m.end());
            }
        }

        // Corporate-suffix organizations; the suffix is part of the span.
        for m in ORG_RE.find_iter(text) {
            push(
                &mut entities,
                &mut seen,
                EntityKind::Organization,
                m.start(),
                m.end(),
            );
        }

        // Preposition-cued locations.
        for cap in LOCATION_CUE_RE.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                let first_word = m.as_str().split_whitespace().next().unwrap_or("");
                if !CUE_STOPWORDS.contains(&first_word) {
                    push(
                        &mut entities,
                        &mut seen,
                        EntityKind::Location,
                        m.start(),
                        m.end(),
                    );
                }
            }
        }

        entities.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        Ok(entities)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str) -> Vec<Entity> {
        HeuristicRecognizer::new().recognize(text).unwrap()
    }

    #[test]
    fn test_person_from_title() {
        let entities = recognize("Please ask Dr. Jane Doe about the results.");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Person && e.text == "Jane Doe"));
    }

    #[test]
    fn test_person_from_name_pair() {
        let text = "Hello, my name is Alice Johnson.";
        let entities = recognize(text);
        let person = entities
            .iter()
            .find(|e| e.kind == EntityKind::Person && e.text == "Alice Johnson")
            .expect("person not detected");
        assert_eq!(&text[person.start..person.end], "Alice Johnson");
    }

    #[test]
    fn test_titled_name_reported_once() {
        let entities = recognize("Contact Dr. Jane Doe today.");
        let count = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Person && e.text == "Jane Doe")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_organization_with_suffix() {
        let entities = recognize("She joined Initech Inc. last spring.");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Organization && e.text == "Initech Inc."));
    }

    #[test]
    fn test_location_from_cue() {
        let entities = recognize("John Smith lives in New York.");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Location && e.text == "New York"));
    }

    #[test]
    fn test_month_after_cue_is_not_location() {
        let entities = recognize("The audit happens in January every year.");
        assert!(entities.iter().all(|e| e.kind != EntityKind::Location));
    }

    #[test]
    fn test_empty_text() {
        assert!(recognize("").is_empty());
    }

    #[test]
    fn test_spans_round_trip() {
        let text = "Met Mr. Alan Turing at Bletchley Park near London.";
        for e in recognize(text) {
            assert_eq!(&text[e.start..e.end], e.text);
        }
    }

    #[test]
    fn test_output_sorted_by_start() {
        let text = "Carol Danvers met Nick Fury near Berlin.";
        let entities = recognize(text);
        for pair in entities.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }
}
