//! Structured PII detection via fixed-grammar matchers.
//!
//! Each matcher is a pure function over any input string, returning every
//! non-overlapping occurrence in left-to-right order with byte offsets into
//! the original text. Matchers are independent of each other and of the
//! named-entity recognizer.

use once_cell::sync::Lazy;
use regex::Regex;

use textveil_core::{Entity, EntityKind};

// Compiled regex patterns (compiled once, reused).
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

// No leading \b: `+` and `(` are not word characters, so a strict leading
// boundary silently drops "+1-800-..." and "(555) ..." style numbers.
// The boundary rule for digit-initial matches is enforced in code instead.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap()
});

// Separator must be uniform across all four groups. The regex crate has no
// backreferences, so each separator variant is spelled out.
static CARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{4}-\d{4}-\d{4}-\d{4}|\d{4} \d{4} \d{4} \d{4}|\d{16})\b").unwrap()
});

/// Match `localpart@domain.tld` shaped tokens, word-boundary anchored.
pub fn match_email(text: &str) -> Vec<Entity> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| Entity::from_span(text, EntityKind::Email, m.start(), m.end()))
        .collect()
}

/// Match North-American phone numbers: optional `+1`/`1` country code,
/// optional parenthesized area code, `-`/`.`/space separators, 3-3-4 digits.
///
/// Matches starting with `+` or `(` need no leading boundary; matches
/// starting with a digit must not be preceded by an alphanumeric character.
/// Can't use lookbehind, so find all candidates and filter.
pub fn match_phone(text: &str) -> Vec<Entity> {
    PHONE_RE
        .find_iter(text)
        .filter(|m| {
            let starts_with_digit = m
                .as_str()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());
            if !starts_with_digit {
                return true;
            }
            match text[..m.start()].chars().next_back() {
                Some(prev) => !prev.is_alphanumeric() && prev != '_',
                None => true,
            }
        })
        .map(|m| Entity::from_span(text, EntityKind::Phone, m.start(), m.end()))
        .collect()
}

/// Match 16-digit payment card numbers: four groups of four with a uniform
/// separator, or a bare run of exactly 16 digits, word-boundary anchored.
pub fn match_credit_card(text: &str) -> Vec<Entity> {
    CARD_RE
        .find_iter(text)
        .map(|m| Entity::from_span(text, EntityKind::CreditCard, m.start(), m.end()))
        .collect()
}

/// Run every structured matcher over `text`.
///
/// Results are concatenated per matcher; overall ordering is established by
/// the merger, not here.
pub fn scan(text: &str) -> Vec<Entity> {
    let mut entities = match_email(text);
    entities.extend(match_phone(text));
    entities.extend(match_credit_card(text));
    entities
}

/// Names of the structured matchers, for status reporting.
pub fn pattern_names() -> &'static [&'static str] {
    &["email", "phone", "credit_card"]
}
