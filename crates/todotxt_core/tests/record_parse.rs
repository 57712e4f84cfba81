use chrono::NaiveDate;
use todotxt_core::{Tag, TodoRecord};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parse_tags_with_shared_keys_and_inner_colons() {
    let todo = TodoRecord::new("(C) Test foo:bar foo:baz foo_:baz_ blah:zah:haz");

    assert!(todo.has_tag("foo", None));
    assert!(todo.has_tag("foo_", None));
    assert!(todo.has_tag("foo", Some("bar")));
    assert!(todo.has_tag("foo", Some("baz")));
    assert!(todo.has_tag("blah", None));
    assert!(todo.has_tag("blah", Some("zah:haz")));
    assert!(!todo.has_tag("blah", Some("zah")));
    assert_eq!(todo.tag_values("foo"), vec!["bar", "baz"]);
}

#[test]
fn empty_tag_value_is_not_a_tag() {
    let todo = TodoRecord::new("Foo due:");
    assert!(!todo.has_tag("due", None));
    assert!(todo.tags().is_empty());
}

#[test]
fn tags_keep_text_order() {
    let todo = TodoRecord::new("Foo b:2 a:1");
    assert_eq!(
        todo.tags(),
        vec![
            Tag {
                key: "b".to_string(),
                value: "2".to_string()
            },
            Tag {
                key: "a".to_string(),
                value: "1".to_string()
            },
        ]
    );
}

#[test]
fn projects_are_separate_tokens() {
    let todo = TodoRecord::new("(C) Foo +Bar +Baz");
    let projects = todo.projects();
    assert_eq!(projects.len(), 2);
    assert!(projects.contains("Bar"));
    assert!(projects.contains("Baz"));
    assert!(todo.has_project("Bar"));
}

#[test]
fn project_absorbs_embedded_plus() {
    let todo = TodoRecord::new("(C) Foo +Bar+Baz");
    let projects = todo.projects();
    assert_eq!(projects.len(), 1);
    assert!(projects.contains("Bar+Baz"));
}

#[test]
fn contexts_follow_project_rules() {
    let todo = TodoRecord::new("(C) Foo @Bar @Baz");
    assert_eq!(todo.contexts().len(), 2);
    assert!(todo.has_context("Baz"));

    let joined = TodoRecord::new("(C) Foo @Bar+Baz");
    let contexts = joined.contexts();
    assert_eq!(contexts.len(), 1);
    assert!(contexts.contains("Bar+Baz"));
}

#[test]
fn completion_requires_x_and_date() {
    assert!(TodoRecord::new("x 2014-06-09 Foo").is_completed());
    assert!(!TodoRecord::new("xx Important xx").is_completed());
    assert!(!TodoRecord::new("x Not complete").is_completed());
    assert!(!TodoRecord::new("X 2014-06-14 Not complete").is_completed());
}

#[test]
fn completion_date_is_parsed() {
    let todo = TodoRecord::new("x 2014-06-09 Foo");
    assert_eq!(todo.completion_date(), Some(day(2014, 6, 9)));
    assert_eq!(todo.priority(), None);
}

#[test]
fn priority_needs_delimiting_space() {
    assert_eq!(TodoRecord::new("(A) Foo").priority(), Some('A'));
    assert_eq!(TodoRecord::new("(A)Foo").priority(), None);
    assert_eq!(TodoRecord::new("Foo (A) Bar").priority(), None);
}

#[test]
fn creation_date_follows_priority_or_starts_line() {
    assert_eq!(
        TodoRecord::new("(A) 2014-06-12 Foo").creation_date(),
        Some(day(2014, 6, 12))
    );
    assert_eq!(
        TodoRecord::new("2014-06-12 Foo").creation_date(),
        Some(day(2014, 6, 12))
    );
    assert_eq!(TodoRecord::new("Foo 2014-06-12").creation_date(), None);
    assert_eq!(TodoRecord::new("2014-13-40 Foo").creation_date(), None);
}

#[test]
fn description_strips_head_only() {
    let todo = TodoRecord::new("(B) 2014-06-12 Call mom +family due:2014-07-01");
    assert_eq!(todo.description(), "Call mom +family due:2014-07-01");
    assert_eq!(TodoRecord::new("(A)Foo").description(), "(A)Foo");
}

#[test]
fn empty_and_malformed_lines_parse_to_absent_fields() {
    for line in ["", "   ", "(", "(A", "x", "x 2014-06", "+", "@ :", ":value"] {
        let todo = TodoRecord::new(line);
        assert_eq!(todo.text(), line);
        assert!(!todo.is_completed(), "line {line:?}");
        assert_eq!(todo.priority(), None, "line {line:?}");
        assert!(todo.tags().is_empty(), "line {line:?}");
        assert!(todo.projects().is_empty(), "line {line:?}");
        assert!(todo.contexts().is_empty(), "line {line:?}");
    }
}

#[test]
fn reparse_of_text_yields_same_fields() {
    let lines = [
        "(C) Test foo:bar foo:baz foo_:baz_ blah:zah:haz",
        "x 2014-06-13 2014-06-12 Foo +Bar @home",
        "x 2014-02-30 Foo",
        "(A)Foo",
        "(Z) 2014-06-12",
        "",
    ];
    for line in lines {
        let todo = TodoRecord::new(line);
        let again = TodoRecord::new(todo.text());
        assert_eq!(again.fields(), todo.fields(), "line {line:?}");
        assert_eq!(again, todo);
    }
}

#[test]
fn string_conversions_parse() {
    let from_str: TodoRecord = "(B) Foo".parse().unwrap();
    let from_ref = TodoRecord::from("(B) Foo");
    assert_eq!(from_str, from_ref);
    assert_eq!(from_str.to_string(), "(B) Foo");
    assert_eq!(String::from(from_ref), "(B) Foo");
    assert_eq!(TodoRecord::default(), TodoRecord::new(""));
}
