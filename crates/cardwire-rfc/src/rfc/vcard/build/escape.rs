//! vCard value escaping.
//!
//! Newlines are not handled here: the line writer turns them into `\n`
//! (3.0/4.0) or switches the value to quoted-printable (2.1).

use crate::rfc::vcard::core::VCardVersion;

/// Escapes a text value for the given version.
///
/// 3.0 and 4.0 escape backslash, comma and semicolon. 2.1 text is written
/// as is.
#[must_use]
pub fn escape_text(s: &str, version: VCardVersion) -> String {
    if version.is_old_style() {
        return s.to_string();
    }
    escape_chars(s, &['\\', ',', ';'])
}

/// Escapes a component of a structured or list value.
///
/// Backslash, semicolon and comma are escaped in every version, since they
/// delimit components and values.
#[must_use]
pub fn escape_component(s: &str) -> String {
    escape_chars(s, &['\\', ';', ','])
}

/// Joins structured value components (`N`, `ADR`): values within a
/// component are separated by commas, components by semicolons.
#[must_use]
pub fn join_structured(components: &[&Vec<String>]) -> String {
    components
        .iter()
        .map(|values| join_list(values))
        .collect::<Vec<_>>()
        .join(";")
}

/// Joins a comma-separated list value.
#[must_use]
pub fn join_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| escape_component(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_chars(s: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
