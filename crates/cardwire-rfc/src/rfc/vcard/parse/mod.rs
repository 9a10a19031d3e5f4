//! vCard parsing.
//!
//! Text flows through three stages: [`FoldedLineReader`] joins folded
//! physical lines, [`RawLineParser`] splits each logical line into group,
//! name, parameters and value, and [`VCardReader`] hands values to the
//! property scribes and assembles the cards.
//!
//! ## Usage
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::parse::VCardReader;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = VCardReader::new(input.as_bytes()).read_all().unwrap();
//! assert_eq!(cards[0].emails()[0].value, "john@example.com");
//! ```

mod error;
mod folded;
mod lexer;
mod reader;
mod values;

#[cfg(test)]
mod error_tests;

pub use error::{ParseError, ParseErrorKind, ParseResult, ParseWarning};
pub use folded::FoldedLineReader;
pub use lexer::{RawLine, RawLineParser};
pub use reader::VCardReader;
pub use values::{parse_structured, split_component, split_structured, unescape_text};
