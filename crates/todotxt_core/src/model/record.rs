//! Task record bound to one todo.txt line.
//!
//! # Responsibility
//! - Parse one line into priority, completion state, dates, tags, projects
//!   and contexts.
//! - Mutate those fields by splicing the raw text, then re-derive.
//!
//! # Invariants
//! - `text` is authoritative; cached head fields always equal a fresh parse.
//! - A completed record never carries a priority.
//! - Malformed input is kept verbatim and only shows up as absent fields.
//! - Tag/project/context views are recomputed from `text` on every call.

use crate::grammar::anchored::{
    head_tokens, match_priority, scan_head, skip_whitespace, HeadTokens, LineHead,
};
use crate::grammar::tokens::{
    context_tokens, is_valid_tag_key, is_valid_tag_value, project_tokens, remove_spans,
    tag_tokens,
};
use crate::model::date::{format_date_token, is_writable, parse_date_token};
use crate::model::priority::Priority;
use chrono::{Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Inline `key:value` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Typed snapshot of every field derivable from a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub priority: Option<Priority>,
    pub completed: bool,
    /// Only set when `completed` and the marker date is a calendar day.
    pub completion_date: Option<NaiveDate>,
    pub creation_date: Option<NaiveDate>,
    /// In text order; repeated keys are kept.
    pub tags: Vec<Tag>,
    pub projects: BTreeSet<String>,
    pub contexts: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct HeadFields {
    priority: Option<Priority>,
    completed: bool,
    completion_date: Option<NaiveDate>,
    creation_date: Option<NaiveDate>,
}

impl HeadFields {
    fn derive(text: &str) -> Self {
        let head = scan_head(text);
        let priority = head
            .priority
            .as_ref()
            .and_then(|m| Priority::try_from(m.letter).ok());
        let completion_date = head
            .completion
            .as_ref()
            .and_then(|m| parse_date_token(&text[m.date_span.clone()]).ok());
        let creation_date = head
            .creation_date
            .as_ref()
            .and_then(|span| parse_date_token(&text[span.clone()]).ok());

        Self {
            priority,
            completed: head.completion.is_some(),
            completion_date,
            creation_date,
        }
    }
}

/// One todo.txt task line plus its derived fields.
///
/// Serializes as the raw line; deserializing parses it again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TodoRecord {
    text: String,
    head: HeadFields,
}

impl TodoRecord {
    /// Parses a line. Never fails.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let head = HeadFields::derive(&text);
        Self { text, head }
    }

    /// Current raw line.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Option<char> {
        self.head.priority.map(Priority::letter)
    }

    pub fn is_completed(&self) -> bool {
        self.head.completed
    }

    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.head.completion_date
    }

    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.head.creation_date
    }

    /// Line without the leading priority, completion marker and dates.
    pub fn description(&self) -> &str {
        &self.text[scan_head(&self.text).body_start..]
    }

    /// All tags in text order.
    pub fn tags(&self) -> Vec<Tag> {
        tag_tokens(&self.text)
            .map(|tag| Tag {
                key: tag.key.to_string(),
                value: tag.value.to_string(),
            })
            .collect()
    }

    /// Values of every tag named `key`, in text order.
    pub fn tag_values(&self, key: &str) -> Vec<&str> {
        tag_tokens(&self.text)
            .filter(|tag| tag.key == key)
            .map(|tag| tag.value)
            .collect()
    }

    /// True when a tag `key` exists, with exactly `value` if one is given.
    pub fn has_tag(&self, key: &str, value: Option<&str>) -> bool {
        tag_tokens(&self.text)
            .any(|tag| tag.key == key && value.map_or(true, |value| tag.value == value))
    }

    pub fn projects(&self) -> BTreeSet<String> {
        project_tokens(&self.text).map(str::to_string).collect()
    }

    pub fn contexts(&self) -> BTreeSet<String> {
        context_tokens(&self.text).map(str::to_string).collect()
    }

    pub fn has_project(&self, name: &str) -> bool {
        project_tokens(&self.text).any(|project| project == name)
    }

    pub fn has_context(&self, name: &str) -> bool {
        context_tokens(&self.text).any(|context| context == name)
    }

    /// Snapshot of every derived field.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            priority: self.head.priority,
            completed: self.head.completed,
            completion_date: self.head.completion_date,
            creation_date: self.head.creation_date,
            tags: self.tags(),
            projects: self.projects(),
            contexts: self.contexts(),
        }
    }

    /// Sets or clears the priority.
    ///
    /// No-op on completed records and for letters outside `A`..=`Z`.
    pub fn set_priority(&mut self, priority: Option<char>) {
        match priority.map(Priority::try_from) {
            None => self.apply_priority(None),
            Some(Ok(priority)) => self.apply_priority(Some(priority)),
            Some(Err(err)) => {
                debug!("event=record_set_priority module=record status=ignored reason=\"{err}\"");
            }
        }
    }

    /// Like [`Self::set_priority`], for untrusted string input such as `"AB"`.
    ///
    /// Anything but one uppercase letter leaves the record untouched.
    pub fn set_priority_str(&mut self, priority: Option<&str>) {
        match priority.map(str::parse::<Priority>) {
            None => self.apply_priority(None),
            Some(Ok(priority)) => self.apply_priority(Some(priority)),
            Some(Err(err)) => {
                debug!("event=record_set_priority module=record status=ignored reason=\"{err}\"");
            }
        }
    }

    fn apply_priority(&mut self, priority: Option<Priority>) {
        if self.head.completed {
            debug!("event=record_set_priority module=record status=noop reason=completed");
            return;
        }

        let existing = match_priority(&self.text);
        match (existing, priority) {
            (Some(found), Some(priority)) => {
                self.text
                    .replace_range(found.letter_span(), &priority.letter().to_string());
            }
            (None, Some(priority)) => {
                self.text.insert_str(0, &format!("({priority}) "));
            }
            (Some(found), None) => {
                // Drop the space too, unless the rest would read as a head.
                let mut cleared = self.text.clone();
                cleared.replace_range(found.span.clone(), "");
                let exposed = head_tokens(&cleared);
                if exposed.priority.is_some() || exposed.completion_date.is_some() {
                    self.text
                        .replace_range(found.span.start..found.span.end - 1, "");
                } else {
                    self.text = cleared;
                }
            }
            (None, None) => return,
        }
        self.rederive();
    }

    /// Replaces every `key` tag with `key:value`, or removes them all when
    /// `value` is absent or empty.
    ///
    /// Keys outside `[A-Za-z0-9_]+` and values containing whitespace cannot
    /// be written as a tag and leave the record untouched.
    pub fn set_tag(&mut self, key: &str, value: Option<&str>) {
        let value = value.filter(|value| !value.is_empty());
        if !is_valid_tag_key(key) || value.is_some_and(|value| !is_valid_tag_value(value)) {
            debug!(
                "event=record_set_tag module=record status=ignored key_len={} reason=unwritable",
                key.len()
            );
            return;
        }

        self.remove_matching_tags(key, None);
        if let Some(value) = value {
            if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
                self.text.push(' ');
            }
            self.text.push_str(key);
            self.text.push(':');
            self.text.push_str(value);
        }
        self.rederive();
    }

    /// Deletes every `key` tag, or only those whose value is exactly `value`.
    pub fn remove_tag(&mut self, key: &str, value: Option<&str>) {
        if self.remove_matching_tags(key, value) > 0 {
            self.rederive();
        }
    }

    fn remove_matching_tags(&mut self, key: &str, value: Option<&str>) -> usize {
        let spans: Vec<_> = tag_tokens(&self.text)
            .filter(|tag| tag.key == key && value.map_or(true, |value| tag.value == value))
            .map(|tag| tag.span)
            .collect();
        let floor = scan_head(&self.text).date_slot;
        remove_spans(&mut self.text, &spans, floor);
        spans.len()
    }

    /// Marks the task done today (local calendar date).
    pub fn set_completed(&mut self) {
        self.set_completed_on(Local::now().date_naive());
    }

    /// Marks the task done on `date`.
    ///
    /// Drops the priority and prepends `x <date> `; a creation date stays
    /// right after the completion date. No-op when already completed.
    pub fn set_completed_on(&mut self, date: NaiveDate) {
        if self.head.completed {
            debug!("event=record_set_completed module=record status=noop reason=completed");
            return;
        }
        if !is_writable(date) {
            debug!("event=record_set_completed module=record status=ignored reason=unwritable_date");
            return;
        }

        if let Some(found) = match_priority(&self.text) {
            self.text.replace_range(found.span, "");
        }
        let marker = if self.text.is_empty() {
            format!("x {}", format_date_token(date))
        } else {
            format!("x {} ", format_date_token(date))
        };
        self.text.insert_str(0, &marker);
        self.rederive();
        self.head.completion_date = Some(date);
    }

    /// Writes, replaces or removes the creation date at its slot.
    pub fn set_creation_date(&mut self, date: Option<NaiveDate>) {
        if date.is_some_and(|date| !is_writable(date)) {
            debug!("event=record_set_creation_date module=record status=ignored reason=unwritable_date");
            return;
        }

        let head: LineHead = scan_head(&self.text);
        match (head.creation_date, date) {
            (Some(span), Some(date)) => {
                self.text.replace_range(span, &format_date_token(date));
            }
            (Some(span), None) => {
                let expected = HeadTokens {
                    creation_date: None,
                    ..head_tokens(&self.text)
                };
                let end = skip_whitespace(&self.text, span.end);
                let mut removed = self.text.clone();
                removed.replace_range(span.start..end, "");
                if head_tokens(&removed) == expected {
                    self.text = removed;
                } else {
                    self.text.replace_range(span, "");
                }
            }
            (None, Some(date)) => {
                let slot = head.date_slot;
                let mut token = String::new();
                if slot > 0 && !self.text[..slot].ends_with(char::is_whitespace) {
                    token.push(' ');
                }
                token.push_str(&format_date_token(date));
                if slot < self.text.len() {
                    token.push(' ');
                }
                self.text.insert_str(slot, &token);
            }
            (None, None) => return,
        }
        self.rederive();
    }

    /// Replaces the whole line; same as building a new record from it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    fn rederive(&mut self) {
        self.head = HeadFields::derive(&self.text);
        debug!(
            "event=record_rederive module=record status=ok text_len={} completed={}",
            self.text.len(),
            self.head.completed
        );
    }
}

impl Display for TodoRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for TodoRecord {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for TodoRecord {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TodoRecord {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<TodoRecord> for String {
    fn from(value: TodoRecord) -> Self {
        value.text
    }
}
