//! Typed model of one todo.txt task line.
//!
//! # Responsibility
//! - Own the raw line as the single source of truth.
//! - Expose typed fields (priority, dates, tags) derived from it.
//!
//! # Invariants
//! - Every mutation rewrites the text first and re-derives fields after.
//! - Derived fields never drift from what a fresh parse of the text yields.

pub mod date;
pub mod priority;
pub mod record;
