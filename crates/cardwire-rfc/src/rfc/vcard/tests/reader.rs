//! Reader behavior on the fixtures and on damaged input.

use super::fixtures::*;
use crate::rfc::vcard::core::properties::{
    BirthdayValue, Note, PhotoSource, RawProperty, TelephoneValue,
};
use crate::rfc::vcard::core::{PropertyKind, VCardDataType};
use crate::rfc::vcard::parse::ParseErrorKind;
use crate::rfc::vcard::{ReaderSettings, VCard, VCardReader, VCardVersion, parse_str};

fn read_one(input: &str) -> (VCard, Vec<String>) {
    let mut reader = VCardReader::new(input.as_bytes());
    let card = reader.read_next().unwrap().expect("a vCard");
    let warnings = reader.warnings().iter().map(ToString::to_string).collect();
    (card, warnings)
}

#[test_log::test]
fn escaped_comma_in_3_0_note() {
    let (card, warnings) = read_one(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nNOTE;LANGUAGE=en:Hello\\, world\r\nEND:VCARD\r\n",
    );
    assert!(warnings.is_empty(), "{warnings:?}");
    let note = card.get_first::<Note>().unwrap();
    assert_eq!(note.value, "Hello, world");
    assert_eq!(note.base.parameters.language(), Some("en"));
    assert_eq!(note.base.parameters.len(), 1);
}

#[test_log::test]
fn missing_colon_is_a_warning_and_reading_continues() {
    let (card, warnings) = read_one(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nNOTE this line has no delimiter\r\nFN:Still here\r\nEND:VCARD\r\n",
    );
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("line 3:"), "{}", warnings[0]);
    assert!(card.notes().is_empty());
    assert_eq!(card.formatted_name().unwrap().value, "Still here");
    assert_eq!(card.len(), 1);
}

#[test]
fn malformed_line_warning_kind() {
    let mut reader = VCardReader::new("BEGIN:VCARD\r\n:no name\r\nEND:VCARD\r\n".as_bytes());
    reader.read_next().unwrap().unwrap();
    let warning = &reader.warnings()[0];
    assert_eq!(warning.line, Some(2));
    assert!(warning.message.starts_with(&ParseErrorKind::MalformedLine.to_string()));
}

#[test_log::test]
fn vcard_21_fixture() {
    let (card, warnings) = read_one(VCARD_21_FULL);
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(card.version(), VCardVersion::V2_1);

    let tel = card.telephones()[0];
    assert_eq!(tel.value, TelephoneValue::Text("555-1234".into()));
    assert_eq!(tel.types(), ["WORK", "VOICE"]);

    assert_eq!(card.notes()[0].value, "Line one\nLine two");
    assert!(card.notes()[0].base.parameters.is_empty());

    let address = card.addresses()[0];
    assert_eq!(address.street, vec!["42 Elm St"]);
    assert_eq!(address.label(), Some("42 Elm St\nSpringfield"));
    assert!(card.orphaned_labels().is_empty());

    let photo = card.photos()[0];
    assert_eq!(photo.content_type.as_deref(), Some("GIF"));
    let Some(PhotoSource::Inline(data)) = &photo.source else {
        panic!("expected inline photo data");
    };
    assert!(data.starts_with(b"GIF89a"));

    let agent = card.agent().unwrap();
    let nested = agent.vcard.as_ref().unwrap();
    assert_eq!(nested.formatted_name().unwrap().value, "Assistant");
    assert_eq!(card.len(), 7);
}

#[test_log::test]
fn vcard_30_fixture() {
    let (card, warnings) = read_one(VCARD_30_FULL);
    assert!(warnings.is_empty(), "{warnings:?}");

    let name = card.structured_name().unwrap();
    assert_eq!(name.family, vec!["Doe"]);
    assert_eq!(name.suffixes, vec!["Esq."]);
    assert_eq!(
        card.addresses()[0].label(),
        Some("123 Main St.\nAnytown, CA 91921\nUSA")
    );
    assert_eq!(card.categories()[0].values, vec!["Friends", "Work"]);
    assert_eq!(
        card.birthday().unwrap().as_date(),
        chrono::NaiveDate::from_ymd_opt(1970, 1, 15)
    );
    assert_eq!(
        card.agent().unwrap().vcard.as_ref().unwrap().formatted_name().unwrap().value,
        "Jane Doe"
    );
    let custom = card.extended_property("x-custom").unwrap();
    assert_eq!(custom.value, "custom value");
    assert_eq!(custom.base.parameters.first("X-PARAM"), Some("1"));
}

#[test_log::test]
fn vcard_40_fixture() {
    let (card, warnings) = read_one(VCARD_40_FULL);
    assert!(warnings.is_empty(), "{warnings:?}");

    let groups = card.alt_id_groups(PropertyKind::FORMATTED_NAME);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].alt_id, Some("1"));
    assert_eq!(groups[0].len(), 2);

    let tel = card.telephones()[0];
    assert_eq!(tel.value, TelephoneValue::Uri("tel:+1-555-555-5555".into()));
    assert!(!tel.base.parameters.contains("VALUE"));

    assert_eq!(card.addresses()[0].label(), Some("42 Elm St\nSpringfield"));
    assert_eq!(card.photos()[0].url_value(), Some("http://example.com/photo.png"));
    assert_eq!(
        card.birthday().unwrap().value,
        BirthdayValue::Text("circa 1800".into())
    );
    assert_eq!(card.emails()[0].base.group.as_deref(), Some("item1"));
    assert_eq!(card.extended_property("X-ABC").unwrap().value, "\\;raw");
}

#[test_log::test]
fn bad_date_falls_back_to_raw_property() {
    let (card, warnings) = read_one(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nBDAY:sometime in spring\r\nEND:VCARD\r\n",
    );
    assert!(card.birthday().is_none());
    let raw = card.get_first::<RawProperty>().unwrap();
    assert!(raw.is_named("BDAY"));
    assert_eq!(raw.value, "sometime in spring");
    assert_eq!(raw.data_type, Some(VCardDataType::Date));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("(BDAY)"), "{}", warnings[0]);
}

#[test]
fn empty_photo_is_skipped_silently() {
    let (card, warnings) =
        read_one("BEGIN:VCARD\r\nVERSION:3.0\r\nPHOTO;ENCODING=b:\r\nEND:VCARD\r\n");
    assert!(card.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn unmatched_label_stays_a_property() {
    let (card, _) = read_one(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nADR;TYPE=home:;;1 Road;;;;\r\nLABEL;TYPE=work:Office\r\nEND:VCARD\r\n",
    );
    assert_eq!(card.addresses()[0].label(), None);
    assert_eq!(card.orphaned_labels()[0].value, "Office");
}

#[test]
fn truncated_card_is_returned_with_warning() {
    let mut reader =
        VCardReader::new("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Cut off\r\n".as_bytes());
    let card = reader.read_next().unwrap().unwrap();
    assert_eq!(card.formatted_name().unwrap().value, "Cut off");
    assert_eq!(reader.warnings().len(), 1);
    assert!(reader.warnings()[0].message.contains("END:VCARD"));
    assert!(reader.read_next().unwrap().is_none());
}

#[test]
fn several_cards_and_noise() {
    let cards = parse_str(TWO_CARDS).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].version(), VCardVersion::V3_0);
    assert_eq!(cards[1].version(), VCardVersion::V4_0);
    assert_eq!(cards[1].formatted_name().unwrap().value, "Second");
}

#[test]
fn version_defaults_to_settings() {
    let input = "BEGIN:VCARD\r\nFN:No version\r\nEND:VCARD\r\n";
    let (card, _) = read_one(input);
    assert_eq!(card.version(), VCardVersion::V2_1);

    let settings = ReaderSettings {
        default_version: VCardVersion::V4_0,
        ..ReaderSettings::default()
    };
    let card = VCardReader::with_settings(input.as_bytes(), settings)
        .read_next()
        .unwrap()
        .unwrap();
    assert_eq!(card.version(), VCardVersion::V4_0);
}

#[test]
fn unknown_charset_falls_back() {
    let (card, warnings) = read_one(
        "BEGIN:VCARD\r\nVERSION:2.1\r\nNOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=X-NOPE:caf=C3=A9\r\nEND:VCARD\r\n",
    );
    assert_eq!(card.notes()[0].value, "café");
    assert_eq!(warnings.len(), 1);
}

#[test]
fn latin1_quoted_printable() {
    let (card, _) = read_one(
        "BEGIN:VCARD\r\nVERSION:2.1\r\nNOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=ISO-8859-1:caf=E9\r\nEND:VCARD\r\n",
    );
    assert_eq!(card.notes()[0].value, "café");
}

#[test]
fn closed_reader_fails() {
    let mut reader = VCardReader::new(TWO_CARDS.as_bytes());
    reader.close();
    reader.close();
    assert!(matches!(
        reader.read_next(),
        Err(crate::error::RfcError::Io(_))
    ));
}
