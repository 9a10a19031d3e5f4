//! Scribes for BDAY and REV.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::{ParseContext, ScribeResult, ScribeSignal, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::properties::{Birthday, BirthdayValue, Revision};
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::unescape_text;

const EXTENDED_DATE: &str = "%Y-%m-%d";
const BASIC_DATE: &str = "%Y%m%d";
const EXTENDED_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";
const BASIC_TIMESTAMP: &str = "%Y%m%dT%H%M%SZ";

fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = value.split_once('T').map_or(value, |(date, _)| date).trim();
    NaiveDate::parse_from_str(date, EXTENDED_DATE)
        .or_else(|_| NaiveDate::parse_from_str(date, BASIC_DATE))
        .ok()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in [BASIC_TIMESTAMP, EXTENDED_TIMESTAMP] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts.and_utc());
        }
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y%m%dT%H%M%S%z") {
        return Some(ts.with_timezone(&Utc));
    }
    parse_date(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// BDAY. Dates are written in the version's preferred form; 4.0 text
/// birthdays are carried as `VALUE=text`.
#[derive(Debug, Default)]
pub struct BirthdayScribe;

impl TypedScribe for BirthdayScribe {
    type Property = Birthday;

    fn property_name(&self) -> &'static str {
        "BDAY"
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V4_0 => Some(VCardDataType::DateAndOrTime),
            _ => Some(VCardDataType::Date),
        }
    }

    fn data_type(&self, property: &Birthday, version: VCardVersion) -> Option<VCardDataType> {
        match property.value {
            BirthdayValue::Text(_) => Some(VCardDataType::Text),
            BirthdayValue::Date(_) => self.default_data_type(version),
        }
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Birthday> {
        if data_type == Some(&VCardDataType::Text) {
            return Ok(Birthday::text(unescape_text(value, ctx.version)));
        }
        parse_date(value)
            .map(Birthday::date)
            .ok_or_else(|| ScribeSignal::CannotParse(format!("invalid date: {value}")))
    }

    fn write_text(&self, property: &Birthday, ctx: &WriteContext<'_>) -> WriteResult {
        Ok(match &property.value {
            BirthdayValue::Text(text) => escape_text(text, ctx.version),
            BirthdayValue::Date(date) if ctx.version == VCardVersion::V4_0 => {
                date.format(BASIC_DATE).to_string()
            }
            BirthdayValue::Date(date) => date.format(EXTENDED_DATE).to_string(),
        })
    }
}

/// REV, always written in UTC.
#[derive(Debug, Default)]
pub struct RevisionScribe;

impl TypedScribe for RevisionScribe {
    type Property = Revision;

    fn property_name(&self) -> &'static str {
        "REV"
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V4_0 => Some(VCardDataType::Timestamp),
            _ => Some(VCardDataType::DateTime),
        }
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> ScribeResult<Revision> {
        parse_timestamp(value)
            .map(Revision::new)
            .ok_or_else(|| ScribeSignal::CannotParse(format!("invalid timestamp: {value}")))
    }

    fn write_text(&self, property: &Revision, ctx: &WriteContext<'_>) -> WriteResult {
        let format = match ctx.version {
            VCardVersion::V4_0 => BASIC_TIMESTAMP,
            _ => EXTENDED_TIMESTAMP,
        };
        Ok(property.timestamp.format(format).to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::rfc::vcard::core::VCard;

    #[test]
    fn birthday_formats() {
        assert_eq!(parse_date("1980-03-22"), NaiveDate::from_ymd_opt(1980, 3, 22));
        assert_eq!(parse_date("19800322"), NaiveDate::from_ymd_opt(1980, 3, 22));
        assert_eq!(
            parse_date("1980-03-22T10:00:00Z"),
            NaiveDate::from_ymd_opt(1980, 3, 22)
        );
        assert_eq!(parse_date("March 22"), None);
    }

    #[test]
    fn birthday_text_and_errors() {
        let mut params = VCardParameters::new();
        let mut ctx = ParseContext::new(VCardVersion::V4_0, "BDAY");
        let bday = TypedScribe::parse_text(
            &BirthdayScribe,
            "circa 1800",
            Some(&VCardDataType::Text),
            &mut params,
            &mut ctx,
        )
        .unwrap();
        assert_eq!(bday.value, BirthdayValue::Text("circa 1800".into()));

        let result = TypedScribe::parse_text(
            &BirthdayScribe,
            "circa 1800",
            Some(&VCardDataType::DateAndOrTime),
            &mut params,
            &mut ctx,
        );
        assert!(matches!(result, Err(ScribeSignal::CannotParse(_))));
    }

    #[test]
    fn birthday_written_per_version() {
        let card = VCard::new();
        let bday = Birthday::date(NaiveDate::from_ymd_opt(1980, 3, 22).unwrap());
        let v4 = WriteContext { version: VCardVersion::V4_0, card: &card };
        let v3 = WriteContext { version: VCardVersion::V3_0, card: &card };
        assert_eq!(TypedScribe::write_text(&BirthdayScribe, &bday, &v4).unwrap(), "19800322");
        assert_eq!(TypedScribe::write_text(&BirthdayScribe, &bday, &v3).unwrap(), "1980-03-22");
    }

    #[test]
    fn revision_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        for value in [
            "20240102T030405Z",
            "2024-01-02T03:04:05Z",
            "2024-01-02T04:04:05+01:00",
            "20240102T040405+0100",
        ] {
            assert_eq!(parse_timestamp(value), Some(expected), "{value}");
        }
        assert_eq!(
            parse_timestamp("2024-01-02"),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);

        let card = VCard::new();
        let rev = Revision::new(expected);
        let v4 = WriteContext { version: VCardVersion::V4_0, card: &card };
        let v21 = WriteContext { version: VCardVersion::V2_1, card: &card };
        assert_eq!(
            TypedScribe::write_text(&RevisionScribe, &rev, &v4).unwrap(),
            "20240102T030405Z"
        );
        assert_eq!(
            TypedScribe::write_text(&RevisionScribe, &rev, &v21).unwrap(),
            "2024-01-02T03:04:05Z"
        );
    }
}
