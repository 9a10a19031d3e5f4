//! vCard implementation (vCard 2.1, RFC 2426 and RFC 6350).
//!
//! ## Overview
//!
//! A [`VCard`] holds its properties as typed values keyed by
//! [`PropertyKind`](core::PropertyKind). Reading and writing go through
//! property scribes ([`scribe`]), which know how one property type looks
//! in each version; properties without a scribe are kept verbatim.
//!
//! ## Usage
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{self, VCardVersion};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:2.1\r\n\
//! N:Doe;John\r\n\
//! FN:John Doe\r\n\
//! TEL;WORK;VOICE:555-1234\r\n\
//! END:VCARD\r\n";
//!
//! let cards = vcard::parse_str(input).unwrap();
//! assert_eq!(cards[0].telephones()[0].number(), "555-1234");
//!
//! let output = vcard::write_str(&cards, VCardVersion::V4_0).unwrap();
//! assert!(output.contains("TEL;TYPE=WORK,VOICE:555-1234\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Data model (`VCard`, properties, parameters, validation)
//! - [`parse`] - Folded-line reader, line parser and [`VCardReader`]
//! - [`build`] - Line folding, line writer and [`VCardWriter`]
//! - [`scribe`] - Property scribes and the [`ScribeRegistry`]

pub mod build;
pub mod core;
pub mod parse;
pub mod quoted_printable;
pub mod scribe;
pub mod settings;

#[cfg(test)]
mod tests;

pub use build::{VCardWriter, WriteError};
pub use core::{VCard, VCardProperty, VCardVersion};
pub use parse::{ParseError, ParseWarning, VCardReader};
pub use scribe::ScribeRegistry;
pub use settings::{ReaderSettings, WriterSettings};

use crate::error::RfcResult;

/// Reads every vCard in `input`, discarding warnings.
///
/// ## Errors
/// Only fails on I/O errors, which an in-memory string does not produce.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_str(input: &str) -> RfcResult<Vec<VCard>> {
    let cards = VCardReader::new(input.as_bytes()).read_all()?;
    tracing::debug!(count = cards.len(), "Parsed vCards");
    Ok(cards)
}

/// Writes `cards` in `version` with default settings.
///
/// ## Errors
/// Returns a [`WriteError`] if a card cannot be written in `version`.
#[tracing::instrument(skip(cards), fields(count = cards.len()))]
pub fn write_str(cards: &[VCard], version: VCardVersion) -> RfcResult<String> {
    let mut writer = VCardWriter::with_settings(Vec::new(), WriterSettings::for_version(version));
    for card in cards {
        writer.write(card)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
