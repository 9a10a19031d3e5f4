//! vCard line folding.
//!
//! Lines are folded by counting characters (not octets) and inserting the
//! configured newline and indent once a line reaches the configured length.

use std::io::{self, Write};

use cardwire_core::constants::{DEFAULT_INDENT, DEFAULT_LINE_LENGTH};
use encoding_rs::Encoding;

use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::quoted_printable;

/// How output lines are folded and terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingOptions {
    /// Maximum characters per physical line, excluding the newline.
    /// `None` disables folding.
    pub line_length: Option<usize>,
    /// Prefix of every continuation line. Must be spaces or tabs.
    pub indent: String,
    pub newline: String,
}

impl Default for FoldingOptions {
    fn default() -> Self {
        Self {
            line_length: Some(DEFAULT_LINE_LENGTH),
            indent: DEFAULT_INDENT.to_string(),
            newline: "\r\n".to_string(),
        }
    }
}

impl FoldingOptions {
    /// Options that never fold.
    #[must_use]
    pub fn unfolded() -> Self {
        Self {
            line_length: None,
            ..Self::default()
        }
    }

    /// ## Errors
    /// Fails if the indent is empty or not whitespace, or if the line length
    /// leaves no room after the indent.
    pub fn validate(&self) -> RfcResult<()> {
        if self.indent.is_empty() || !self.indent.chars().all(is_fold_whitespace) {
            return Err(RfcError::InvalidSettings(
                "fold indent must be one or more spaces or tabs".to_string(),
            ));
        }
        let indent_len = self.indent.chars().count();
        if let Some(length) = self.line_length.filter(|&length| length <= indent_len) {
            return Err(RfcError::InvalidSettings(format!(
                "line length {length} must be greater than the indent length"
            )));
        }
        Ok(())
    }
}

/// Writes text, folding lines as they reach the configured length.
#[derive(Debug)]
pub struct FoldedLineWriter<W> {
    writer: W,
    options: FoldingOptions,
    indent_len: usize,
    /// Characters on the current physical line.
    cur_len: usize,
}

impl<W: Write> FoldedLineWriter<W> {
    /// ## Errors
    /// Fails if the options are invalid (see [`FoldingOptions::validate`]).
    pub fn new(writer: W, options: FoldingOptions) -> RfcResult<Self> {
        options.validate()?;
        Ok(Self {
            writer,
            indent_len: options.indent.chars().count(),
            options,
            cur_len: 0,
        })
    }

    #[must_use]
    pub fn options(&self) -> &FoldingOptions {
        &self.options
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes plain text.
    ///
    /// ## Errors
    /// Returns any I/O error from the underlying writer.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write(text, false, encoding_rs::UTF_8)
    }

    /// Writes text, quoted-printable encoding it first when asked.
    ///
    /// Quoted-printable output reserves one column for the `=` soft break
    /// written before each fold, and never splits an `=XX` triplet. A space
    /// or tab falling on a quoted-printable fold starts the next line as
    /// `=20` / `=09`, since unfolding strips leading whitespace.
    ///
    /// ## Errors
    /// Returns any I/O error from the underlying writer.
    pub fn write(
        &mut self,
        text: &str,
        quoted_printable: bool,
        charset: &'static Encoding,
    ) -> io::Result<()> {
        let encoded;
        let text = if quoted_printable {
            encoded = quoted_printable::encode(text, charset);
            encoded.as_str()
        } else {
            text
        };

        let Some(line_length) = self.options.line_length else {
            self.writer.write_all(text.as_bytes())?;
            return Ok(());
        };
        let max = if quoted_printable {
            line_length.saturating_sub(1).max(self.indent_len + 1)
        } else {
            line_length
        };

        let mut out = String::with_capacity(text.len() + text.len() / max * 4);
        let mut line_start = self.cur_len == 0;
        let mut triplet_remaining = 0usize;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\r' || c == '\n' {
                out.push(c);
                self.cur_len = 0;
                line_start = true;
                triplet_remaining = 0;
                continue;
            }

            let starts_triplet = quoted_printable && c == '=';
            let needs_fold = if starts_triplet && !line_start {
                self.cur_len + 3 > max
            } else {
                self.cur_len >= max
            };

            if needs_fold && quoted_printable && is_fold_whitespace(c) {
                out.push('=');
                out.push_str(&self.options.newline);
                out.push_str(&self.options.indent);
                out.push_str(if c == ' ' { "=20" } else { "=09" });
                self.cur_len = self.indent_len + 3;
                line_start = false;
                continue;
            }

            // never fold before whitespace, or inside a triplet
            let deferred = is_fold_whitespace(c) || triplet_remaining > 0;
            if needs_fold && !deferred {
                if quoted_printable {
                    out.push('=');
                }
                out.push_str(&self.options.newline);
                out.push_str(&self.options.indent);
                self.cur_len = self.indent_len;
            }

            out.push(c);
            self.cur_len += 1;
            line_start = false;
            if starts_triplet {
                triplet_remaining = 2;
            } else if triplet_remaining > 0 {
                triplet_remaining -= 1;
            }
        }

        self.writer.write_all(out.as_bytes())
    }

    /// Ends the current line.
    ///
    /// ## Errors
    /// Returns any I/O error from the underlying writer.
    pub fn newline(&mut self) -> io::Result<()> {
        self.cur_len = 0;
        self.writer.write_all(self.options.newline.as_bytes())
    }

    /// ## Errors
    /// Returns any I/O error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn is_fold_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[cfg(test)]
mod tests {
    use encoding_rs::UTF_8;
    use proptest::prelude::*;

    use super::*;
    use crate::rfc::vcard::parse::FoldedLineReader;

    fn fold(text: &str, options: FoldingOptions, qp: bool) -> String {
        let mut writer = FoldedLineWriter::new(Vec::new(), options).unwrap();
        writer.write(text, qp, UTF_8).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn with_length(line_length: usize) -> FoldingOptions {
        FoldingOptions {
            line_length: Some(line_length),
            ..FoldingOptions::default()
        }
    }

    #[test]
    fn short_line_unchanged() {
        assert_eq!(fold("FN:John Doe", FoldingOptions::default(), false), "FN:John Doe");
    }

    #[test]
    fn fold_at_75_characters() {
        let folded = fold(&"A".repeat(80), FoldingOptions::default(), false);
        let lines: Vec<&str> = folded.split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 75);
        assert_eq!(lines[1], " AAAAA");
    }

    #[test]
    fn fold_counts_characters() {
        let folded = fold(&"日".repeat(80), FoldingOptions::default(), false);
        let first = folded.split("\r\n").next().unwrap();
        assert_eq!(first.chars().count(), 75);
    }

    #[test]
    fn existing_newlines_reset_the_counter() {
        let text = format!("{}\r\n{}", "A".repeat(10), "B".repeat(10));
        assert_eq!(fold(&text, with_length(12), false), text);
    }

    #[test]
    fn fold_deferred_past_whitespace() {
        assert_eq!(fold("ABCD  EF", with_length(4), false), "ABCD  \r\n EF");
    }

    #[test]
    fn no_fold_when_only_whitespace_remains() {
        assert_eq!(fold("ABCD   ", with_length(4), false), "ABCD   ");
    }

    #[test]
    fn folding_disabled() {
        let text = "A".repeat(200);
        assert_eq!(fold(&text, FoldingOptions::unfolded(), false), text);
    }

    #[test]
    fn custom_indent_and_newline() {
        let options = FoldingOptions {
            line_length: Some(5),
            indent: "\t".to_string(),
            newline: "\n".to_string(),
        };
        assert_eq!(fold("ABCDEFGH", options, false), "ABCDE\n\tFGH");
    }

    #[test]
    fn quoted_printable_soft_breaks() {
        let folded = fold(&"é".repeat(20), FoldingOptions::default(), true);
        for line in folded.split("\r\n") {
            assert!(line.chars().count() <= 75, "{line}");
            let body = line.trim_start().trim_end_matches('=');
            assert_eq!(body.len() % 3, 0, "split triplet in {line}");
        }
        assert!(folded.rsplit("\r\n").skip(1).all(|l| l.ends_with('=')));
    }

    #[test]
    fn quoted_printable_whitespace_at_fold() {
        let text = format!("{} B", "A".repeat(74));
        let folded = fold(&text, FoldingOptions::default(), true);
        assert_eq!(folded, format!("{}=\r\n =20B", "A".repeat(74)));
    }

    #[test]
    fn invalid_options() {
        assert!(with_length(1).validate().is_err());
        let options = FoldingOptions {
            indent: "x".to_string(),
            ..FoldingOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(FoldedLineWriter::new(Vec::new(), with_length(0)).is_err());
    }

    proptest! {
        #[test]
        fn unfold_inverts_fold(text in "[^\r\n]{0,300}", length in 2usize..100) {
            let line = format!("NOTE:{text}");
            let folded = fold(&line, with_length(length), false);

            for physical in folded.split("\r\n") {
                let len = physical.chars().count();
                let has_trailing_ws = physical.ends_with([' ', '\t']);
                prop_assert!(len <= length || has_trailing_ws);
            }

            let mut reader = FoldedLineReader::new(folded.as_bytes());
            let unfolded = reader.read_line().unwrap();
            prop_assert_eq!(unfolded, Some(line));
        }

        #[test]
        fn quoted_printable_lines_stay_within_length(
            text in "[a-z \t=\u{e9}]{0,200}",
            length in 35usize..100,
        ) {
            let prefix = "NOTE;ENCODING=QUOTED-PRINTABLE:";
            let mut writer = FoldedLineWriter::new(Vec::new(), with_length(length)).unwrap();
            writer.write_str(prefix).unwrap();
            writer.write(&text, true, UTF_8).unwrap();
            let folded = String::from_utf8(writer.into_inner()).unwrap();

            for physical in folded.split("\r\n") {
                prop_assert!(physical.chars().count() <= length, "{}", physical);
            }

            let mut reader = FoldedLineReader::new(folded.as_bytes());
            let unfolded = reader.read_line().unwrap().unwrap();
            let value = unfolded.strip_prefix(prefix).unwrap();
            prop_assert_eq!(quoted_printable::decode(value, UTF_8), text);
        }
    }
}
