//! vCard value unescaping and splitting.

use crate::rfc::vcard::core::VCardVersion;

/// Unescapes a text value for the given version.
///
/// 3.0 and 4.0 decode `\n`, `\,`, `\;` and `\\`; other escapes are kept.
/// 2.1 text is taken as is.
#[must_use]
pub fn unescape_text(s: &str, version: VCardVersion) -> String {
    if version.is_old_style() {
        return s.to_string();
    }
    unescape(s)
}

fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    result.push('\n');
                }
                Some(&next @ (',' | ';' | '\\')) => {
                    chars.next();
                    result.push(next);
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a structured value into its raw components on unescaped `;`.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ';' {
            parts.push(&s[start..i]);
            start = i + 1;
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a component on unescaped `,` and unescapes each value.
///
/// An empty component has no values.
#[must_use]
pub fn split_component(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in s.chars() {
        if escaped {
            escaped = false;
            current.push('\\');
            current.push(c);
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            parts.push(unescape(&std::mem::take(&mut current)));
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push('\\');
    }

    parts.push(unescape(&current));
    parts
}

/// Parses a structured value into unescaped component lists.
#[must_use]
pub fn parse_structured(s: &str) -> Vec<Vec<String>> {
    split_structured(s).into_iter().map(split_component).collect()
}
