//! Textveil Redact: entity merging and offset-safe mask substitution.
//!
//! `merge` establishes the presentation ordering over all detector outputs;
//! `redaction_order` is the separate ordering the applier consumes; `redact`
//! rewrites the text. The two orderings are deliberately distinct functions
//! and must never be conflated.

pub mod apply;
pub mod merge;

pub use apply::redact;
pub use merge::{merge, redaction_order};
