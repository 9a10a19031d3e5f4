//! Tests for vCard parse errors.

use super::error::{ParseError, ParseErrorKind, ParseWarning};

#[test]
fn error_new() {
    let err = ParseError::new(ParseErrorKind::UnexpectedEof, 5, "test message");
    assert_eq!(err.line, 5);
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(err.message, "test message");
}

#[test]
fn error_malformed_carries_text() {
    let err = ParseError::malformed(10, "NOTE no colon");
    assert_eq!(err.line, 10);
    assert_eq!(err.kind, ParseErrorKind::MalformedLine);
    assert!(err.message.contains("NOTE no colon"));
}

#[test]
fn error_unsupported_version() {
    let err = ParseError::unsupported_version(2, "5.0");
    assert_eq!(err.kind, ParseErrorKind::UnsupportedVersion);
    assert!(err.message.contains("5.0"));
}

#[test]
fn error_invalid_value() {
    let err = ParseError::invalid_value(7, "malformed phone number");
    assert_eq!(err.line, 7);
    assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    assert_eq!(err.message, "malformed phone number");
}

#[test]
fn error_display() {
    let err = ParseError::new(ParseErrorKind::EncodingError, 12, "bad bytes");
    let displayed = format!("{err}");
    assert!(displayed.contains("line 12"));
    assert!(displayed.contains("encoding error"));
    assert!(displayed.contains("bad bytes"));
}

#[test]
fn error_kind_display() {
    assert_eq!(
        format!("{}", ParseErrorKind::UnexpectedEof),
        "unexpected end of input"
    );
    assert_eq!(format!("{}", ParseErrorKind::MalformedLine), "malformed line");
    assert_eq!(format!("{}", ParseErrorKind::InvalidValue), "invalid value");
    assert_eq!(
        format!("{}", ParseErrorKind::UnsupportedVersion),
        "unsupported version"
    );
}

#[test]
fn warning_from_error_keeps_line() {
    let warning = ParseWarning::from(ParseError::malformed(4, "garbage"));
    assert_eq!(warning.line, Some(4));
    assert!(warning.property.is_none());
    assert!(warning.to_string().starts_with("line 4: malformed line"));
}

#[test]
fn warning_display_variants() {
    let w = ParseWarning::new(Some(3), Some("BDAY"), "bad date");
    assert_eq!(w.to_string(), "line 3 (BDAY): bad date");
    let w = ParseWarning::new(None, Some("BDAY"), "bad date");
    assert_eq!(w.to_string(), "BDAY: bad date");
    let w = ParseWarning::new(None, None, "bad date");
    assert_eq!(w.to_string(), "bad date");
}
