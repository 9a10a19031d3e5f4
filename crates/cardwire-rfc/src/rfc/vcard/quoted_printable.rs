//! Quoted-printable value encoding (vCard 2.1).
//!
//! Values are converted to and from bytes with the charset named by the
//! CHARSET parameter (via `encoding_rs`), then `=XX` escaped.

use std::str;

use encoding_rs::{Encoding, UTF_8};

/// Looks up a charset by its label (`UTF-8`, `ISO-8859-1`, `windows-1252`...).
#[must_use]
pub fn charset(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.trim().as_bytes())
}

/// Looks up a charset, falling back to UTF-8 for unknown labels.
#[must_use]
pub fn charset_or_utf8(label: Option<&str>) -> &'static Encoding {
    label.and_then(charset).unwrap_or(UTF_8)
}

/// Whether every character of `text` can be written in `charset`.
///
/// Charsets `encoding_rs` only decodes (UTF-16, replacement) cannot be
/// written at all.
#[must_use]
pub fn can_encode(text: &str, charset: &'static Encoding) -> bool {
    if charset.output_encoding() != charset {
        return false;
    }
    let (_, _, had_errors) = charset.encode(text);
    !had_errors
}

/// Encodes text as quoted-printable in the given charset.
///
/// Printable ASCII other than `=` is kept, as are spaces and tabs that are
/// not at the end of the value; every other byte becomes `=XX`. Characters
/// the charset cannot hold come out as `&#NNNN;`, so callers check
/// [`can_encode`] first.
#[must_use]
pub fn encode(text: &str, charset: &'static Encoding) -> String {
    let (bytes, _, _) = charset.encode(text);
    let mut out = String::with_capacity(bytes.len());
    for (i, &b) in bytes.iter().enumerate() {
        let last = i + 1 == bytes.len();
        let literal = match b {
            b'=' => false,
            b' ' | b'\t' => !last,
            33..=126 => true,
            _ => false,
        };
        if literal {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("={b:02X}"));
        }
    }
    out
}

/// Decodes a quoted-printable value in the given charset.
///
/// Soft line breaks are discarded. Invalid escapes are kept verbatim and
/// bytes invalid in the charset become U+FFFD. Encoded CRLF line breaks
/// come out as `\n`, the same as an escaped newline in 3.0 and 4.0.
#[must_use]
pub fn decode(value: &str, charset: &'static Encoding) -> String {
    let bytes = decode_bytes(value.as_bytes());
    let (text, _) = charset.decode_without_bom_handling(&bytes);
    if text.contains("\r\n") {
        return text.replace("\r\n", "\n");
    }
    text.into_owned()
}

fn decode_bytes(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut split = s.split(|&b| b == b'=');
    if let Some(prefix) = split.next() {
        out.extend_from_slice(prefix);
    }

    for element in split {
        if element.first() == Some(&b'\n') {
            out.extend_from_slice(&element[1..]);
            continue;
        }
        if element.starts_with(b"\r\n") {
            out.extend_from_slice(&element[2..]);
            continue;
        }

        let decoded = element
            .get(..2)
            .and_then(|hex| str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match decoded {
            Some(b) => {
                out.push(b);
                out.extend_from_slice(&element[2..]);
            }
            None => {
                out.push(b'=');
                out.extend_from_slice(element);
            }
        }
    }
    out
}
