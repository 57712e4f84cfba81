//! Text grammar of a single todo.txt line.
//!
//! # Responsibility
//! - Provide anchored matchers for the line head (priority, completion,
//!   creation date).
//! - Provide a span-aware tokenizer for inline tags, projects and contexts.
//!
//! # Invariants
//! - Matchers never fail: unrecognized text is simply not matched.
//! - All spans are byte offsets into the scanned `&str` and fall on char
//!   boundaries.

pub mod anchored;
pub mod tokens;
