//! Content line writer.

use std::io::Write;

use cardwire_core::constants::DEFAULT_QUOTED_PRINTABLE_CHARSET;

use super::error::WriteError;
use super::fold::FoldedLineWriter;
use crate::error::RfcResult;
use crate::rfc::vcard::core::parameter::names;
use crate::rfc::vcard::core::{Encoding, VCardParameters, VCardVersion};
use crate::rfc::vcard::quoted_printable;

const NAME_FORBIDDEN: [char; 5] = ['.', ';', ':', '\r', '\n'];
const PARAMETER_NAME_FORBIDDEN: [char; 5] = [';', ':', '=', '\r', '\n'];

/// Writes `[group.]name *(;param):value` lines for one version.
#[derive(Debug)]
pub struct RawLineWriter<W> {
    writer: FoldedLineWriter<W>,
    version: VCardVersion,
    caret_encoding: bool,
}

impl<W: Write> RawLineWriter<W> {
    pub fn new(writer: FoldedLineWriter<W>, version: VCardVersion) -> Self {
        Self {
            writer,
            version,
            caret_encoding: false,
        }
    }

    /// Enables RFC 6868 (`^n`, `^'`, `^^`) encoding of parameter values.
    #[must_use]
    pub fn with_caret_encoding(mut self, enabled: bool) -> Self {
        self.caret_encoding = enabled;
        self
    }

    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.version
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.version = version;
    }

    pub fn folded_mut(&mut self) -> &mut FoldedLineWriter<W> {
        &mut self.writer
    }

    pub fn into_inner(self) -> FoldedLineWriter<W> {
        self.writer
    }

    /// Writes one content line.
    ///
    /// ## Errors
    /// Returns a [`WriteError`] if the group, name or a parameter cannot be
    /// written in this version (nothing is written in that case), or any
    /// I/O error.
    pub fn write_line(
        &mut self,
        group: Option<&str>,
        name: &str,
        parameters: &VCardParameters,
        value: &str,
    ) -> RfcResult<()> {
        if name.is_empty() {
            return Err(WriteError::IllegalPropertyName {
                name: String::new(),
                forbidden: Vec::new(),
            }
            .into());
        }
        if let Some(forbidden) = forbidden_in(name, &NAME_FORBIDDEN) {
            return Err(WriteError::IllegalPropertyName {
                name: name.to_string(),
                forbidden,
            }
            .into());
        }
        let illegal_group =
            group.and_then(|group| forbidden_in(group, &NAME_FORBIDDEN).map(|f| (group, f)));
        if let Some((group, forbidden)) = illegal_group {
            return Err(WriteError::IllegalGroup {
                property: name.to_string(),
                group: group.to_string(),
                forbidden,
            }
            .into());
        }

        let mut parameters = parameters.clone();
        let has_newline = value.contains(['\r', '\n']);
        if has_newline && self.version.is_old_style() {
            parameters.set_encoding(Some(&Encoding::QuotedPrintable));
        }

        let quoted_printable = parameters.is_quoted_printable();
        let charset = if quoted_printable {
            let label = parameters.charset();
            let requested = label.and_then(quoted_printable::charset);
            match requested {
                Some(charset) if quoted_printable::can_encode(value, charset) => charset,
                _ => {
                    match (label, requested) {
                        (Some(label), None) => tracing::warn!(
                            charset = label,
                            property = name,
                            "Unknown charset, using UTF-8"
                        ),
                        (Some(label), Some(_)) => tracing::warn!(
                            charset = label,
                            property = name,
                            "Value cannot be encoded in charset, using UTF-8"
                        ),
                        (None, _) => {}
                    }
                    parameters.set_charset(Some(DEFAULT_QUOTED_PRINTABLE_CHARSET));
                    encoding_rs::UTF_8
                }
            }
        } else {
            encoding_rs::UTF_8
        };

        let mut line = String::new();
        if let Some(group) = group {
            line.push_str(group);
            line.push('.');
        }
        line.push_str(name);
        for parameter in &parameters {
            self.write_parameter(&mut line, name, &parameter.name, &parameter.values)?;
        }
        line.push(':');

        let value = if has_newline && !quoted_printable {
            escape_newlines(value, "\\n")
        } else {
            value.to_string()
        };

        tracing::trace!(property = name, "Writing line");
        self.writer.write_str(&line)?;
        self.writer.write(&value, quoted_printable, charset)?;
        self.writer.newline()?;
        Ok(())
    }

    fn write_parameter(
        &self,
        line: &mut String,
        property: &str,
        name: &str,
        values: &[String],
    ) -> Result<(), WriteError> {
        if let Some(forbidden) = forbidden_in(name, &PARAMETER_NAME_FORBIDDEN) {
            return Err(WriteError::IllegalParameterName {
                property: property.to_string(),
                parameter: name.to_string(),
                forbidden,
            });
        }
        let illegal = |value: &str, forbidden: Vec<char>| WriteError::IllegalParameterValue {
            property: property.to_string(),
            parameter: name.to_string(),
            value: value.to_string(),
            forbidden,
        };

        if self.version.is_old_style() {
            let positional = name.eq_ignore_ascii_case(names::TYPE);
            for value in values {
                let mut forbidden = vec![':', '\r', '\n'];
                if positional {
                    forbidden.push('=');
                }
                if value.contains(forbidden.as_slice()) {
                    return Err(illegal(value, forbidden));
                }
                line.push(';');
                if !positional {
                    line.push_str(name);
                    line.push('=');
                }
                for c in value.chars() {
                    if c == '\\' || c == ';' {
                        line.push('\\');
                    }
                    line.push(c);
                }
            }
            return Ok(());
        }

        line.push(';');
        line.push_str(name);
        line.push('=');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            let value_escaped = value.replace('\\', "\\\\");
            let escaped = if self.caret_encoding {
                caret_encode(&value_escaped)
            } else {
                let newline_allowed = self.version == VCardVersion::V4_0
                    && name.eq_ignore_ascii_case(names::LABEL);
                let mut forbidden = vec!['"'];
                if !newline_allowed {
                    forbidden.extend(['\r', '\n']);
                }
                if value.contains(forbidden.as_slice()) {
                    return Err(illegal(value, forbidden));
                }
                let escaped = escape_newlines(&value_escaped, "\\n");
                if has_caret_escape(&escaped) {
                    return Err(illegal(value, vec!['^']));
                }
                escaped
            };

            if escaped.contains([',', ':', ';']) {
                line.push('"');
                line.push_str(&escaped);
                line.push('"');
            } else {
                line.push_str(&escaped);
            }
        }
        Ok(())
    }
}

/// The characters of `s` that may not be written, including a leading
/// space or tab.
fn forbidden_in(s: &str, forbidden: &[char]) -> Option<Vec<char>> {
    let leading = s.chars().next().filter(|c| *c == ' ' || *c == '\t');
    let contained = s.chars().any(|c| forbidden.contains(&c));
    if leading.is_none() && !contained {
        return None;
    }
    let mut chars: Vec<char> = leading.into_iter().collect();
    if contained {
        chars.extend_from_slice(forbidden);
    }
    Some(chars)
}

/// Replaces each newline (`\r\n`, `\r` or `\n`) with `replacement`.
fn escape_newlines(s: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str(replacement);
            }
            '\n' => result.push_str(replacement),
            c => result.push(c),
        }
    }
    result
}

/// Whether a reader decoding `^` escapes would read part of `s` as one:
/// a `^` followed by `n`, `'`, `^` or `\`, or one at the end.
fn has_caret_escape(s: &str) -> bool {
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '^' && matches!(chars.peek(), None | Some('n' | '\'' | '^' | '\\')) {
            return true;
        }
    }
    false
}

fn caret_encode(s: &str) -> String {
    let escaped = s.replace('^', "^^").replace('"', "^'");
    escape_newlines(&escaped, "^n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfcError;
    use crate::rfc::vcard::build::FoldingOptions;

    fn write_line(
        version: VCardVersion,
        caret: bool,
        group: Option<&str>,
        name: &str,
        parameters: &VCardParameters,
        value: &str,
    ) -> RfcResult<String> {
        let folded = FoldedLineWriter::new(Vec::new(), FoldingOptions::unfolded())?;
        let mut writer = RawLineWriter::new(folded, version).with_caret_encoding(caret);
        writer.write_line(group, name, parameters, value)?;
        Ok(String::from_utf8(writer.into_inner().into_inner()).unwrap())
    }

    fn params(pairs: &[(&str, &str)]) -> VCardParameters {
        let mut params = VCardParameters::new();
        for (name, value) in pairs {
            params.put(name, *value);
        }
        params
    }

    #[test]
    fn simple_line_with_group() {
        let out = write_line(
            VCardVersion::V3_0,
            false,
            Some("item1"),
            "TEL",
            &params(&[("TYPE", "cell")]),
            "+1 555",
        )
        .unwrap();
        assert_eq!(out, "item1.TEL;TYPE=cell:+1 555\r\n");
    }

    #[test]
    fn old_style_newline_forces_quoted_printable() {
        let out = write_line(
            VCardVersion::V2_1,
            false,
            None,
            "NOTE",
            &VCardParameters::new(),
            "line one\r\nline two",
        )
        .unwrap();
        assert_eq!(
            out,
            "NOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:line one=0D=0Aline two\r\n"
        );
    }

    #[test]
    fn old_style_unknown_charset_falls_back() {
        let out = write_line(
            VCardVersion::V2_1,
            false,
            None,
            "NOTE",
            &params(&[("CHARSET", "x-bogus")]),
            "a\nb",
        )
        .unwrap();
        assert!(out.contains("CHARSET=UTF-8"), "{out}");
        assert!(!out.contains("x-bogus"));
    }

    #[test]
    fn new_style_newline_is_escaped() {
        let out = write_line(
            VCardVersion::V4_0,
            false,
            None,
            "NOTE",
            &VCardParameters::new(),
            "a\r\nb\nc",
        )
        .unwrap();
        assert_eq!(out, "NOTE:a\\nb\\nc\r\n");
    }

    #[test]
    fn old_style_types_are_positional() {
        let out = write_line(
            VCardVersion::V2_1,
            false,
            None,
            "TEL",
            &params(&[("TYPE", "HOME"), ("TYPE", "WORK"), ("X-P", r"a;b\c")]),
            "555",
        )
        .unwrap();
        assert_eq!(out, "TEL;HOME;WORK;X-P=a\\;b\\\\c:555\r\n");
    }

    #[test]
    fn old_style_parameter_value_restrictions() {
        let err = write_line(
            VCardVersion::V2_1,
            false,
            None,
            "TEL",
            &params(&[("TYPE", "a=b")]),
            "555",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RfcError::Write(WriteError::IllegalParameterValue { .. })
        ));

        assert!(write_line(VCardVersion::V2_1, false, None, "TEL", &params(&[("X-P", "a=b")]), "5").is_ok());
        assert!(write_line(VCardVersion::V2_1, false, None, "TEL", &params(&[("X-P", "a:b")]), "5").is_err());
    }

    #[test]
    fn new_style_quotes_special_values() {
        let out = write_line(
            VCardVersion::V3_0,
            false,
            None,
            "X-TEST",
            &params(&[("TYPE", "home"), ("TYPE", "work"), ("X-P", "a,b")]),
            "v",
        )
        .unwrap();
        assert_eq!(out, "X-TEST;TYPE=home,work;X-P=\"a,b\":v\r\n");
    }

    #[test]
    fn new_style_rejects_quotes_without_caret() {
        let err = write_line(
            VCardVersion::V4_0,
            false,
            None,
            "NOTE",
            &params(&[("X-P", "say \"hi\"")]),
            "v",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RfcError::Write(WriteError::IllegalParameterValue { .. })
        ));
    }

    #[test]
    fn caret_encoding() {
        let out = write_line(
            VCardVersion::V4_0,
            true,
            None,
            "NOTE",
            &params(&[("X-P", "a^b\n\"c\"")]),
            "v",
        )
        .unwrap();
        assert_eq!(out, "NOTE;X-P=a^^b^n^'c^':v\r\n");
    }

    #[test]
    fn caret_sequences_need_caret_encoding() {
        for value in ["a^nb", "^^", "q^'", "end^", "a^\nb"] {
            let err = write_line(
                VCardVersion::V4_0,
                false,
                None,
                "ADR",
                &params(&[("LABEL", value)]),
                ";;;;;;",
            )
            .unwrap_err();
            assert!(
                matches!(err, RfcError::Write(WriteError::IllegalParameterValue { .. })),
                "{value:?}"
            );
        }

        let out = write_line(VCardVersion::V4_0, false, None, "NOTE", &params(&[("X-P", "a^b")]), "v")
            .unwrap();
        assert_eq!(out, "NOTE;X-P=a^b:v\r\n");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = write_line(VCardVersion::V3_0, false, None, "", &VCardParameters::new(), "v")
            .unwrap_err();
        assert!(matches!(err, RfcError::Write(WriteError::IllegalPropertyName { .. })));
    }

    #[test]
    fn label_keeps_newlines_in_4_0() {
        let out = write_line(
            VCardVersion::V4_0,
            false,
            None,
            "ADR",
            &params(&[("LABEL", "123 Main St\nAnytown")]),
            ";;123 Main St;;;;",
        )
        .unwrap();
        assert_eq!(out, "ADR;LABEL=123 Main St\\nAnytown:;;123 Main St;;;;\r\n");

        assert!(write_line(
            VCardVersion::V3_0,
            false,
            None,
            "ADR",
            &params(&[("LABEL", "a\nb")]),
            ";;;;;;",
        )
        .is_err());
    }

    #[test]
    fn illegal_names() {
        let empty = VCardParameters::new();
        let err = write_line(VCardVersion::V3_0, false, None, "BAD:NAME", &empty, "v").unwrap_err();
        assert!(matches!(err, RfcError::Write(WriteError::IllegalPropertyName { .. })));

        let err = write_line(VCardVersion::V3_0, false, Some("a.b"), "NOTE", &empty, "v").unwrap_err();
        assert!(matches!(err, RfcError::Write(WriteError::IllegalGroup { .. })));

        let err = write_line(VCardVersion::V3_0, false, None, " NOTE", &empty, "v").unwrap_err();
        assert!(matches!(err, RfcError::Write(WriteError::IllegalPropertyName { .. })));

        let err = write_line(VCardVersion::V3_0, false, None, "NOTE", &params(&[("X=Y", "v")]), "v")
            .unwrap_err();
        assert!(matches!(err, RfcError::Write(WriteError::IllegalParameterName { .. })));
    }
}
