//! Whitespace tokenizer and inline token classifiers.
//!
//! # Responsibility
//! - Split a line into whitespace-delimited tokens with byte spans.
//! - Classify tokens as tags (`key:value`), projects (`+name`) and
//!   contexts (`@name`).
//! - Remove token spans without leaving doubled separators.
//!
//! # Invariants
//! - A tag needs a non-empty value; `key:` alone is inert text.
//! - Project/context names run to the next whitespace, so embedded `+`/`@`
//!   stay inside one name.

use crate::grammar::anchored::head_tokens;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token regex"));
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+):(\S+)$").expect("valid tag regex"));
static TAG_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid tag key regex"));

/// One whitespace-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Token<'_> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// Token shaped as `key:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub span: Range<usize>,
}

pub fn tokenize(text: &str) -> impl Iterator<Item = Token<'_>> {
    TOKEN_RE.find_iter(text).map(|m| Token {
        text: m.as_str(),
        start: m.start(),
    })
}

pub fn tag_tokens(text: &str) -> impl Iterator<Item = TagToken<'_>> {
    tokenize(text).filter_map(|token| {
        let caps = TAG_RE.captures(token.text)?;
        Some(TagToken {
            key: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str(),
            span: token.span(),
        })
    })
}

pub fn project_tokens(text: &str) -> impl Iterator<Item = &str> {
    prefixed_tokens(text, '+')
}

pub fn context_tokens(text: &str) -> impl Iterator<Item = &str> {
    prefixed_tokens(text, '@')
}

fn prefixed_tokens(text: &str, sigil: char) -> impl Iterator<Item = &str> {
    tokenize(text).filter_map(move |token| {
        token
            .text
            .strip_prefix(sigil)
            .filter(|name| !name.is_empty())
    })
}

/// Whether `key` can be written back as the key of a tag token.
pub fn is_valid_tag_key(key: &str) -> bool {
    TAG_KEY_RE.is_match(key)
}

/// Whether `value` can be written back as the value of a tag token.
pub fn is_valid_tag_value(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

/// Removes token spans from `text`.
///
/// Each token leaves together with one neighbouring whitespace run: the run
/// before it, or the run after it when nothing but the line head (the first
/// `floor` bytes) precedes it, so the head keeps its delimiting space.
/// The run after is kept when dropping it would pull a token into the head
/// (priority, completion marker or creation date slot).
/// Spans must come from tokenizing `text`, start at or after `floor` and be
/// sorted ascending.
pub fn remove_spans(text: &mut String, spans: &[Range<usize>], floor: usize) {
    // Back to front, so earlier spans stay valid.
    for span in spans.iter().rev() {
        let before = &text[..span.start];
        let trimmed_before = before.trim_end();
        let range = if trimmed_before.len() <= floor {
            let after = &text[span.end..];
            let gap = after.len() - after.trim_start().len();
            let mut candidate = text.clone();
            candidate.replace_range(span.start..span.end + gap, "");
            if head_tokens(&candidate) == head_tokens(text.as_str()) {
                span.start..span.end + gap
            } else {
                span.clone()
            }
        } else {
            trimmed_before.len()..span.end
        };
        text.replace_range(range, "");
    }
}
