//! Round-trip parsing and serialization tests for vCard.
//!
//! Each fixture is read, written back in its own version, and read again.
//! The cards must match apart from PRODID, which the writer replaces.

use proptest::prelude::*;

use super::fixtures::*;
use crate::error::RfcError;
use crate::rfc::vcard::core::PropertyKind;
use crate::rfc::vcard::core::properties::Note;
use crate::rfc::vcard::{
    ReaderSettings, VCard, VCardReader, VCardVersion, VCardWriter, WriteError, WriterSettings,
    parse_str, write_str,
};

fn without_prodid(mut card: VCard) -> VCard {
    card.remove_all(PropertyKind::PRODUCT_ID);
    card
}

/// Parse a vCard, serialize it, then parse again and compare.
fn round_trip(input: &str, version: VCardVersion) -> Result<(), String> {
    let mut reader = VCardReader::new(input.as_bytes());
    let first = reader
        .read_next()
        .map_err(|e| format!("First parse failed: {e}"))?
        .ok_or("First parse found no vCard")?;
    if !reader.warnings().is_empty() {
        return Err(format!("First parse had warnings: {:?}", reader.warnings()));
    }
    if first.version() != version {
        return Err(format!("Version mismatch: {} vs {version}", first.version()));
    }

    let serialized = write_str(std::slice::from_ref(&first), version)
        .map_err(|e| format!("Serialize failed: {e}"))?;

    let second = parse_str(&serialized).map_err(|e| format!("Second parse failed: {e}"))?;
    let [second] = <[VCard; 1]>::try_from(second)
        .map_err(|cards| format!("Expected one vCard, got {}\n{serialized}", cards.len()))?;

    let (first, second) = (without_prodid(first), without_prodid(second));
    if first != second {
        return Err(format!("vCards differ:\n{first:#?}\nvs\n{second:#?}\n{serialized}"));
    }
    Ok(())
}

#[test_log::test]
fn round_trip_vcard_21() {
    round_trip(VCARD_21_FULL, VCardVersion::V2_1).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_vcard_30() {
    round_trip(VCARD_30_FULL, VCardVersion::V3_0).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_vcard_40() {
    round_trip(VCARD_40_FULL, VCardVersion::V4_0).expect("round trip should succeed");
}

#[test]
fn round_trip_long_note() {
    let input = format!(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Long\r\nNOTE:{}\r\nEND:VCARD\r\n",
        "Lorem ipsum, dolor; sit amet ".repeat(20)
    );
    round_trip(&input, VCardVersion::V3_0).expect("round trip should succeed");
}

#[test]
fn round_trip_multibyte_text_in_21() {
    let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nN:Müller;Jürgen\r\nFN:Jürgen Müller\r\nNOTE:Grüße\r\nEND:VCARD\r\n";
    round_trip(input, VCardVersion::V2_1).expect("round trip should succeed");
}

#[test]
fn version_conversion_keeps_values() {
    let cards = parse_str(VCARD_30_FULL).unwrap();
    let output = write_str(&cards, VCardVersion::V4_0).unwrap();
    let converted = parse_str(&output).unwrap();
    let card = &converted[0];

    assert_eq!(card.version(), VCardVersion::V4_0);
    assert_eq!(card.formatted_name().unwrap().value, "John Doe");
    assert_eq!(card.notes()[0].value, "Hello, world");
    // LABEL becomes a parameter, AGENT has no 4.0 form
    assert_eq!(
        card.addresses()[0].label(),
        Some("123 Main St.\nAnytown, CA 91921\nUSA")
    );
    assert!(card.agent().is_none());
    assert!(output.contains("BDAY:19700115\r\n"));
    assert!(output.contains("REV:20240102T030405Z\r\n"));
}

#[test]
fn version_conversion_from_21_keeps_line_breaks() {
    let original = parse_str(VCARD_21_FULL).unwrap();
    let output = write_str(&original, VCardVersion::V3_0).unwrap();
    let converted = parse_str(&output).unwrap();

    let (before, after) = (&original[0], &converted[0]);
    assert_eq!(after.addresses()[0].label(), Some("42 Elm St\nSpringfield"));
    assert_eq!(after.addresses()[0].label(), before.addresses()[0].label());
    assert_eq!(after.notes()[0].value, before.notes()[0].value);
}

/// Writes a NOTE carrying `X-P=value`, then reads it back with the default
/// reader settings.
fn parameter_round_trip(
    value: &str,
    settings: WriterSettings,
) -> Result<Option<String>, RfcError> {
    let mut note = Note::new("x");
    note.base.parameters.put("X-P", value);
    let mut card = VCard::new();
    card.add(note);

    let mut writer = VCardWriter::with_settings(Vec::new(), settings);
    writer.write(&card)?;
    let output = writer.into_inner()?;

    let mut reader = VCardReader::with_settings(output.as_slice(), ReaderSettings::default());
    let card = reader.read_next()?.expect("written vCard should read back");
    Ok(card.notes()[0]
        .base
        .parameters
        .first("X-P")
        .map(str::to_string))
}

#[test]
fn caret_sequences_without_caret_encoding_are_rejected() {
    for value in ["a^nb", "^'q^'", "^^", "x^", r"^\"] {
        let err = parameter_round_trip(value, WriterSettings::default()).unwrap_err();
        assert!(
            matches!(err, RfcError::Write(WriteError::IllegalParameterValue { .. })),
            "{value}: {err}"
        );
    }
    assert_eq!(
        parameter_round_trip("a^b ^,c", WriterSettings::default()).unwrap(),
        Some("a^b ^,c".to_string())
    );
}

#[test]
fn caret_sequences_with_caret_encoding_survive() {
    let settings = WriterSettings {
        caret_encoding: true,
        ..WriterSettings::default()
    };
    assert_eq!(
        parameter_round_trip("a^nb ^'q^' ^^", settings).unwrap(),
        Some("a^nb ^'q^' ^^".to_string())
    );
}

proptest! {
    #[test]
    fn parameter_values_survive_default_settings(value in r#"[a-z ^"\\',;:]{0,20}"#) {
        match parameter_round_trip(&value, WriterSettings::default()) {
            Ok(read) => prop_assert_eq!(read, Some(value)),
            Err(RfcError::Write(WriteError::IllegalParameterValue { .. })) => {}
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }

    #[test]
    fn parameter_values_survive_caret_encoding(value in r#"[a-z ^"\\',;:]{0,20}"#) {
        let settings = WriterSettings {
            caret_encoding: true,
            ..WriterSettings::default()
        };
        let read = parameter_round_trip(&value, settings);
        prop_assert!(read.is_ok(), "{:?}", read);
        prop_assert_eq!(read.ok().flatten(), Some(value));
    }
}
