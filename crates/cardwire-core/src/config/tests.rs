//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_without_sources() {
    tracing::debug!("Testing configuration defaults");

    let settings = Settings::from_toml("").unwrap();

    assert_eq!(settings.reader.default_version, "2.1");
    assert!(settings.reader.caret_decoding);
    assert_eq!(settings.reader.quoted_printable_charset, "UTF-8");

    assert_eq!(settings.writer.version, "3.0");
    assert!(settings.writer.fold_lines);
    assert_eq!(settings.writer.line_length, 75);
    assert_eq!(settings.writer.indent, " ");
    assert_eq!(settings.writer.newline, Newline::Crlf);
    assert!(!settings.writer.caret_encoding);
    assert!(settings.writer.version_strict);
    assert!(settings.writer.add_prodid);
}

#[test]
fn test_toml_overrides_defaults() {
    let settings = Settings::from_toml(
        r#"
        [writer]
        version = "4.0"
        line_length = 60
        newline = "lf"
        caret_encoding = true
        "#,
    )
    .unwrap();

    assert_eq!(settings.writer.version, "4.0");
    assert_eq!(settings.writer.line_length, 60);
    assert_eq!(settings.writer.newline, Newline::Lf);
    assert!(settings.writer.caret_encoding);
    // untouched keys keep their defaults
    assert_eq!(settings.writer.indent, " ");
    assert_eq!(settings.reader.default_version, "2.1");
}

#[test]
fn test_invalid_type_is_rejected() {
    let result = Settings::from_toml(
        r#"
        [writer]
        line_length = "wide"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_newline_sequences() {
    assert_eq!(Newline::Crlf.as_str(), "\r\n");
    assert_eq!(Newline::Lf.as_str(), "\n");
    assert_eq!(Newline::Cr.as_str(), "\r");
}

#[test]
fn test_newline_deserialization() {
    let newline: Newline = serde_json::from_str("\"cr\"").unwrap();
    assert_eq!(newline, Newline::Cr);
}

#[test]
fn test_default_impls_match_loader() {
    let loaded = Settings::from_toml("").unwrap();
    let built = Settings::default();

    assert_eq!(loaded.writer.version, built.writer.version);
    assert_eq!(loaded.writer.line_length, built.writer.line_length);
    assert_eq!(loaded.reader.default_version, built.reader.default_version);
}
