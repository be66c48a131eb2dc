//! Offset-safe mask substitution.

use tracing::debug;

use textveil_core::{Entity, Error, RedactionRecord, Result};

use crate::merge::redaction_order;

/// Produce a redacted copy of `text` and a report of what was removed.
///
/// Entity offsets must be valid against `text` exactly as passed in; any
/// out-of-range or mid-codepoint offset fails fast with `SpanOutOfBounds`
/// and no partial result. Spans are then spliced in descending end order on
/// a running copy, so completed substitutions never shift the offsets of
/// pending spans. The mask length is independent of span length, which is
/// why the descending order is required rather than left-to-right index
/// arithmetic.
///
/// The report lists one record per applied splice, in processing order
/// (descending end offset). Callers wanting document order re-sort by
/// `start`. Neither `text` nor `entities` is mutated.
pub fn redact(
    text: &str,
    entities: &[Entity],
    mask: &str,
) -> Result<(String, Vec<RedactionRecord>)> {
    for e in entities {
        if e.start > e.end
            || e.end > text.len()
            || !text.is_char_boundary(e.start)
            || !text.is_char_boundary(e.end)
        {
            return Err(Error::SpanOutOfBounds {
                start: e.start,
                end: e.end,
                len: text.len(),
            });
        }
    }

    let ordered = redaction_order(entities);
    let mut redacted = text.to_string();
    let mut report = Vec::with_capacity(ordered.len());

    for e in &ordered {
        // Guard against already-rewritten text: an overlapping or duplicate
        // span whose window was touched by an earlier splice no longer
        // matches its original text and is skipped deterministically.
        if e.end > redacted.len()
            || !redacted.is_char_boundary(e.start)
            || !redacted.is_char_boundary(e.end)
            || redacted[e.start..e.end] != e.text
        {
            debug!(
                "Skipping splice {}..{}: window already rewritten",
                e.start, e.end
            );
            continue;
        }
        redacted.replace_range(e.start..e.end, mask);
        report.push(RedactionRecord::for_entity(e));
    }

    Ok((redacted, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use textveil_core::{EntityKind, DEFAULT_MASK};

    fn entity(text: &str, kind: EntityKind, start: usize, end: usize) -> Entity {
        Entity::new(text, kind, start, end)
    }

    fn email_at(text: &str, needle: &str) -> Entity {
        let start = text.find(needle).unwrap();
        Entity::from_span(text, EntityKind::Email, start, start + needle.len())
    }

    #[test]
    fn test_single_span_replaced_exactly() {
        let text = "A@b.com";
        let entities = vec![email_at(text, "A@b.com")];
        let (redacted, report) = redact(text, &entities, DEFAULT_MASK).unwrap();
        assert_eq!(redacted, "[REDACTED]");
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].text, "A@b.com");
        assert_eq!(report[0].kind, EntityKind::Email);
        assert_eq!((report[0].start, report[0].end), (0, 7));
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let text = "write to A@b.com today";
        let entities = vec![email_at(text, "A@b.com")];
        let (redacted, _) = redact(text, &entities, DEFAULT_MASK).unwrap();
        assert_eq!(redacted, "write to [REDACTED] today");
    }

    #[test]
    fn test_mask_length_independent_of_span() {
        let text = "id 123-456-7890 end";
        let phone = entity("123-456-7890", EntityKind::Phone, 3, 15);
        let (short, _) = redact(text, &[phone.clone()], "*").unwrap();
        assert_eq!(short, "id * end");
        let (long, _) = redact(text, &[phone], "<<hidden-for-privacy>>").unwrap();
        assert_eq!(long, "id <<hidden-for-privacy>> end");
    }

    #[test]
    fn test_non_overlapping_length_arithmetic() {
        let text = "a@x.com and b@y.org and 5551234567";
        let entities = vec![
            email_at(text, "a@x.com"),
            email_at(text, "b@y.org"),
            entity("5551234567", EntityKind::Phone, 24, 34),
        ];
        let mask = "[REDACTED]";
        let (redacted, report) = redact(text, &entities, mask).unwrap();
        let removed: usize = entities.iter().map(|e| e.len()).sum();
        assert_eq!(
            redacted.len(),
            text.len() - removed + mask.len() * entities.len()
        );
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_report_in_descending_processing_order() {
        let text = "a@x.com then b@y.org then c@z.io";
        let entities = vec![
            email_at(text, "a@x.com"),
            email_at(text, "b@y.org"),
            email_at(text, "c@z.io"),
        ];
        let (_, report) = redact(text, &entities, DEFAULT_MASK).unwrap();
        let ends: Vec<usize> = report.iter().map(|r| r.end).collect();
        let mut sorted = ends.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ends, sorted);
        // Offsets reference the original text.
        for r in &report {
            assert_eq!(&text[r.start..r.end], r.text);
        }
    }

    #[test]
    fn test_multi_byte_neighbors() {
        let text = "héllo a@x.com wörld";
        let entities = vec![email_at(text, "a@x.com")];
        let (redacted, _) = redact(text, &entities, DEFAULT_MASK).unwrap();
        assert_eq!(redacted, "héllo [REDACTED] wörld");
    }

    #[test]
    fn test_out_of_bounds_fails_fast() {
        let text = "short";
        let entities = vec![entity("nope", EntityKind::Person, 2, 99)];
        let err = redact(text, &entities, DEFAULT_MASK).unwrap_err();
        assert!(matches!(
            err,
            Error::SpanOutOfBounds {
                start: 2,
                end: 99,
                len: 5
            }
        ));
    }

    #[test]
    fn test_mid_codepoint_offset_rejected() {
        let text = "héllo";
        // Index 2 falls inside the two-byte 'é'.
        let entities = vec![entity("é", EntityKind::Person, 1, 2)];
        assert!(redact(text, &entities, DEFAULT_MASK).is_err());
    }

    #[test]
    fn test_inverted_span_rejected() {
        let text = "abcdef";
        let entities = vec![entity("cb", EntityKind::Person, 3, 1)];
        assert!(redact(text, &entities, DEFAULT_MASK).is_err());
    }

    #[test]
    fn test_empty_entity_list_is_identity() {
        let (redacted, report) = redact("nothing here", &[], DEFAULT_MASK).unwrap();
        assert_eq!(redacted, "nothing here");
        assert!(report.is_empty());
    }

    #[test]
    fn test_identical_spans_redact_once() {
        // Two detectors flagging the same window: the first splice wins, the
        // duplicate sees a rewritten window and is skipped.
        let text = "ping a@x.com";
        let e = email_at(text, "a@x.com");
        let (redacted, report) = redact(text, &[e.clone(), e], DEFAULT_MASK).unwrap();
        assert_eq!(redacted, "ping [REDACTED]");
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_nested_overlap_outer_wins() {
        let text = "0123456789";
        let outer = entity("234567", EntityKind::Person, 2, 8);
        let inner = entity("45", EntityKind::Location, 4, 6);
        let (redacted, report) = redact(text, &[inner, outer], "[X]").unwrap();
        assert_eq!(redacted, "01[X]89");
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].text, "234567");
    }

    #[test]
    fn test_inputs_not_mutated() {
        let text = "a@x.com";
        let entities = vec![email_at(text, "a@x.com")];
        let before = entities.clone();
        let _ = redact(text, &entities, DEFAULT_MASK).unwrap();
        assert_eq!(entities, before);
    }
}
