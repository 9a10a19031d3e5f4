//! Content line lexer.
//!
//! Splits a logical line into `[group.]name *(;param):value` in a single
//! pass. Escape sequences are only decoded inside the parameter section;
//! the value is returned undecoded, since its escaping depends on the
//! property.

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::VCardParameters;
use crate::rfc::vcard::core::VCardVersion;
use crate::rfc::vcard::core::parameter::guess_parameter_name;

/// A parsed content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name, as written.
    pub name: String,
    pub parameters: VCardParameters,
    /// Raw value string.
    pub value: String,
}

impl RawLine {
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Parses logical lines, tracking the version in effect.
///
/// The version changes whenever a `VERSION` line is parsed, since 2.1 allows
/// VERSION anywhere in the record.
#[derive(Debug, Clone)]
pub struct RawLineParser {
    version: VCardVersion,
    caret_decoding: bool,
}

impl RawLineParser {
    #[must_use]
    pub fn new(version: VCardVersion) -> Self {
        Self {
            version,
            caret_decoding: true,
        }
    }

    /// Enables or disables RFC 6868 (`^n`, `^'`, `^^`) decoding.
    #[must_use]
    pub fn with_caret_decoding(mut self, enabled: bool) -> Self {
        self.caret_decoding = enabled;
        self
    }

    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.version
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.version = version;
    }

    /// Parses one logical line.
    ///
    /// ## Errors
    /// `MalformedLine` if the line has no name or no `:`;
    /// `UnsupportedVersion` for a VERSION line with an unknown value.
    pub fn parse(&mut self, line: &str, line_number: usize) -> ParseResult<RawLine> {
        let old_style = self.version.is_old_style();
        let caret = self.caret_decoding && !old_style;

        let mut group: Option<String> = None;
        let mut name: Option<String> = None;
        let mut parameters = VCardParameters::new();
        let mut param_name: Option<String> = None;
        let mut value: Option<String> = None;

        let mut buf = String::new();
        let mut escape: Option<char> = None;
        let mut in_quotes = false;

        for (i, ch) in line.char_indices() {
            if let Some(esc) = escape.take() {
                unescape(esc, ch, old_style, &mut buf);
                continue;
            }

            if name.is_some() && (ch == '\\' || (ch == '^' && caret)) {
                escape = Some(ch);
                continue;
            }

            if ch == '.' && group.is_none() && name.is_none() {
                group = Some(std::mem::take(&mut buf));
                continue;
            }

            if (ch == ';' || ch == ':') && !in_quotes {
                let field = std::mem::take(&mut buf);
                if name.is_none() {
                    name = Some(if old_style {
                        field.trim().to_string()
                    } else {
                        field
                    });
                } else {
                    let field = if old_style { field.trim().to_string() } else { field };
                    // a parameter ends; its name carries no further
                    put_parameter(&mut parameters, param_name.take(), field);
                }
                if ch == ':' {
                    value = Some(line[i + 1..].to_string());
                    break;
                }
                continue;
            }

            if name.is_some() {
                if ch == ',' && !in_quotes && !old_style {
                    let field = std::mem::take(&mut buf);
                    put_parameter(&mut parameters, param_name.clone(), field);
                    continue;
                }

                if ch == '=' && param_name.is_none() {
                    let field = std::mem::take(&mut buf);
                    let field = if old_style { field.trim() } else { field.as_str() };
                    param_name = Some(field.to_ascii_uppercase());
                    continue;
                }

                if ch == '"' && !old_style {
                    in_quotes = !in_quotes;
                    continue;
                }
            }

            buf.push(ch);
        }

        let (Some(name), Some(value)) = (name, value) else {
            return Err(ParseError::malformed(line_number, line));
        };
        if name.is_empty() {
            return Err(ParseError::malformed(line_number, line));
        }

        if name.eq_ignore_ascii_case("VERSION") {
            let Some(version) = VCardVersion::parse(&value) else {
                return Err(ParseError::unsupported_version(line_number, &value));
            };
            tracing::trace!(%version, line = line_number, "Version changed");
            self.version = version;
        }

        Ok(RawLine {
            group,
            name,
            parameters,
            value,
        })
    }
}

fn unescape(esc: char, ch: char, old_style: bool, buf: &mut String) {
    match (esc, ch) {
        ('\\', '\\') => buf.push('\\'),
        ('\\', 'n' | 'N') | ('^', 'n') => buf.push('\n'),
        ('\\', ';') if old_style => buf.push(';'),
        ('\\', '"') if !old_style => buf.push('"'),
        ('^', '^') => buf.push('^'),
        ('^', '\'') => buf.push('"'),
        _ => {
            buf.push(esc);
            buf.push(ch);
        }
    }
}

/// Stores a parameter value, naming a nameless one by what it looks like.
fn put_parameter(parameters: &mut VCardParameters, name: Option<String>, value: String) {
    match name {
        Some(name) => parameters.put(&name, value),
        None if value.is_empty() => {}
        None => parameters.put(guess_parameter_name(&value), value),
    }
}
