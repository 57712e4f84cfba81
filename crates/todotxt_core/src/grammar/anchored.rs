//! Anchored matchers for the head of a task line.
//!
//! # Responsibility
//! - Recognize the priority token, the completion marker and the creation
//!   date at their fixed positions.
//! - Report byte spans so mutators can splice text in place.
//!
//! # Invariants
//! - A priority token is only recognized when followed by exactly one space.
//! - Priority and completion never both match: they start with `(` and `x`.
//! - Date tokens are shape-matched here; calendar validity is checked later.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([A-Z])\) ").expect("valid priority regex"));
static COMPLETION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^x ([0-9]{4}-[0-9]{2}-[0-9]{2})(?:\s|$)").expect("valid completion regex")
});
static LEADING_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})(?:\s|$)").expect("valid leading date regex")
});

/// Leading `(X) ` priority token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityMatch {
    pub letter: char,
    /// Covers `(`, letter, `)` and the single trailing space.
    pub span: Range<usize>,
}

impl PriorityMatch {
    /// Byte range of the letter inside the parentheses.
    pub fn letter_span(&self) -> Range<usize> {
        self.span.start + 1..self.span.start + 2
    }
}

/// Leading `x YYYY-MM-DD` completion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMatch {
    /// Byte range of the date-shaped token after `x `.
    pub date_span: Range<usize>,
    /// End of the marker including one delimiting whitespace char, if any.
    pub end: usize,
}

/// Head layout of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHead {
    pub priority: Option<PriorityMatch>,
    pub completion: Option<CompletionMatch>,
    /// Byte range of the creation date token, if one sits at its slot.
    pub creation_date: Option<Range<usize>>,
    /// Position where the creation date slot starts.
    pub date_slot: usize,
    /// Position where the free-form description starts.
    pub body_start: usize,
}

pub fn match_priority(text: &str) -> Option<PriorityMatch> {
    let caps = PRIORITY_RE.captures(text)?;
    let whole = caps.get(0)?;
    let letter = caps.get(1)?.as_str().chars().next()?;
    Some(PriorityMatch {
        letter,
        span: whole.range(),
    })
}

pub fn match_completion(text: &str) -> Option<CompletionMatch> {
    let caps = COMPLETION_RE.captures(text)?;
    Some(CompletionMatch {
        date_span: caps.get(1)?.range(),
        end: caps.get(0)?.end(),
    })
}

/// Matches a date token starting exactly at `from`.
pub fn match_date_at(text: &str, from: usize) -> Option<Range<usize>> {
    let rest = text.get(from..)?;
    let date = LEADING_DATE_RE.captures(rest)?.get(1)?;
    Some(from + date.start()..from + date.end())
}

/// Scans priority, completion marker and creation date in one pass.
pub fn scan_head(text: &str) -> LineHead {
    let priority = match_priority(text);
    let completion = match_completion(text);

    let date_slot = match (&priority, &completion) {
        (Some(priority), _) => priority.span.end,
        (None, Some(completion)) => completion.end,
        (None, None) => 0,
    };
    let creation_date = match_date_at(text, date_slot);
    let body_start = match &creation_date {
        Some(span) => skip_whitespace(text, span.end),
        None => date_slot,
    };

    LineHead {
        priority,
        completion,
        creation_date,
        date_slot,
        body_start,
    }
}

/// Head tokens as text, comparable across lines regardless of offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadTokens<'a> {
    pub priority: Option<char>,
    pub completion_date: Option<&'a str>,
    pub creation_date: Option<&'a str>,
}

pub fn head_tokens(text: &str) -> HeadTokens<'_> {
    let head = scan_head(text);
    HeadTokens {
        priority: head.priority.map(|m| m.letter),
        completion_date: head.completion.map(|m| &text[m.date_span]),
        creation_date: head.creation_date.map(|span| &text[span]),
    }
}

/// Returns the first non-whitespace position at or after `from`.
pub fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map_or(text.len(), |(offset, _)| from + offset)
}
