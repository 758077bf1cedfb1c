//! Storage-ready encoding of scalar and list values.
//!
//! # Responsibility
//! - Join repeated sub-fields into one delimited string.
//! - Map empty values to the NULL marker.
//! - Render values as quoted text literals for script output.
//!
//! # Invariants
//! - Empty and absent optional values are indistinguishable once encoded
//!   (both NULL); [`quote_text`] is the exception for required columns.
//! - Joining is lossy when an element contains [`LIST_DELIMITER`].
//!
//! Bound-parameter writers only need [`non_empty`] and [`join_list`];
//! literal rendering is reserved for textual SQL output.

/// Separator placed between elements of list-valued fields.
pub const LIST_DELIMITER: &str = "|||";

/// Literal emitted for absent or empty values.
pub const NULL_LITERAL: &str = "NULL";

const QUOTE: char = '\'';

/// Returns `None` for an empty string.
pub fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Joins list elements with [`LIST_DELIMITER`].
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(LIST_DELIMITER)
}

/// Joins list elements, returning `None` when the result is empty.
pub fn join_non_empty<S: AsRef<str>>(items: &[S]) -> Option<String> {
    let joined = join_list(items);
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Splits a value produced by [`join_list`] back into elements.
///
/// An empty input yields no elements.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_DELIMITER).map(str::to_owned).collect()
}

/// Renders a value as a quoted text literal, empty strings included.
///
/// Used for `NOT NULL` columns, where an empty value stays `''`.
pub fn quote_text(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push(QUOTE);
    for ch in value.chars() {
        if ch == QUOTE {
            literal.push(QUOTE);
        }
        literal.push(ch);
    }
    literal.push(QUOTE);
    literal
}

/// Renders a value as a quoted text literal, or [`NULL_LITERAL`].
pub fn encode_literal(value: Option<&str>) -> String {
    match value.and_then(non_empty) {
        None => NULL_LITERAL.to_string(),
        Some(text) => quote_text(text),
    }
}

/// Joins then renders a list-valued field.
pub fn encode_list<S: AsRef<str>>(items: &[S]) -> String {
    encode_literal(Some(join_list(items).as_str()))
}

#[cfg(test)]
mod tests {
    use super::{
        encode_list, encode_literal, join_list, join_non_empty, non_empty, quote_text,
        split_list, LIST_DELIMITER, NULL_LITERAL,
    };

    #[test]
    fn empty_and_absent_values_encode_as_null() {
        assert_eq!(encode_literal(None), NULL_LITERAL);
        assert_eq!(encode_literal(Some("")), NULL_LITERAL);
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x"), Some("x"));
    }

    #[test]
    fn quotes_are_doubled_and_wrapped() {
        assert_eq!(encode_literal(Some("plain")), "'plain'");
        assert_eq!(encode_literal(Some("it's")), "'it''s'");
        assert_eq!(encode_literal(Some("''")), "''''''");
    }

    #[test]
    fn required_text_keeps_empty_string() {
        assert_eq!(quote_text(""), "''");
        assert_eq!(quote_text("it's"), "'it''s'");
    }

    #[test]
    fn null_marker_differs_from_quoted_null_text() {
        assert_eq!(encode_literal(Some("NULL")), "'NULL'");
    }

    #[test]
    fn list_join_uses_fixed_delimiter() {
        assert_eq!(join_list(&["a", "b", "c"]), "a|||b|||c");
        assert_eq!(join_list::<&str>(&[]), "");
        assert_eq!(join_non_empty::<String>(&[]), None);
        assert_eq!(join_non_empty(&["x"]).as_deref(), Some("x"));
        assert_eq!(encode_list(&["a", "it's"]), "'a|||it''s'");
        assert_eq!(encode_list::<&str>(&[]), NULL_LITERAL);
    }

    #[test]
    fn split_inverts_join_for_delimiter_free_elements() {
        let samples: Vec<Vec<String>> = vec![
            vec!["〔論語〕".to_string()],
            vec!["如：「愛人」".to_string(), "example, with | pipe".to_string()],
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        ];
        for items in samples {
            assert_eq!(split_list(&join_list(&items)), items);
        }
        assert!(split_list("").is_empty());
    }

    #[test]
    fn join_is_lossy_when_element_contains_delimiter() {
        let items = vec![format!("left{LIST_DELIMITER}right")];
        assert_eq!(split_list(&join_list(&items)).len(), 2);
    }
}
