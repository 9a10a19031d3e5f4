//! Folded-line reader.
//!
//! Joins continuation lines (physical lines that begin with whitespace) onto
//! the logical line before them. A vCard 2.1 quoted-printable value may also
//! continue with a soft line break: a trailing `=` joins the next physical
//! line whether or not it is indented.

use std::io::{self, BufRead};

/// Reads logical lines from a folded stream.
#[derive(Debug)]
pub struct FoldedLineReader<R> {
    reader: R,
    peeked: Option<(usize, String)>,
    physical_line: usize,
    line_number: usize,
}

impl<R: BufRead> FoldedLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            physical_line: 0,
            line_number: 0,
        }
    }

    /// The 1-based physical line on which the last logical line started.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next logical line, or `None` at end of input.
    ///
    /// ## Errors
    /// Returns any I/O error from the underlying reader.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let (number, first) = loop {
            match self.next_physical()? {
                None => return Ok(None),
                Some((_, line)) if line.is_empty() => {}
                Some(found) => break found,
            }
        };

        self.line_number = number;
        let mut logical = if first.starts_with(is_fold_whitespace) {
            first.trim_start_matches(is_fold_whitespace).to_string()
        } else {
            first
        };

        loop {
            if logical.ends_with('=') && is_quoted_printable(&logical) {
                let Some((_, next)) = self.next_physical()? else {
                    break;
                };
                logical.pop();
                logical.push_str(next.trim_start_matches(is_fold_whitespace));
                continue;
            }

            let Some((number, next)) = self.next_physical()? else {
                break;
            };
            if next.is_empty() {
                continue;
            }
            if next.starts_with(is_fold_whitespace) {
                logical.push_str(next.trim_start_matches(is_fold_whitespace));
            } else {
                self.peeked = Some((number, next));
                break;
            }
        }

        Ok(Some(logical))
    }

    fn next_physical(&mut self) -> io::Result<Option<(usize, String)>> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(Some(peeked));
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        self.physical_line += 1;
        Ok(Some((
            self.physical_line,
            String::from_utf8_lossy(&buf).into_owned(),
        )))
    }
}

fn is_fold_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Whether the parameter section of a (partial) logical line declares
/// quoted-printable encoding.
fn is_quoted_printable(line: &str) -> bool {
    let Some(colon) = line.find(':') else {
        return false;
    };
    line[..colon]
        .to_ascii_uppercase()
        .contains("QUOTED-PRINTABLE")
}
