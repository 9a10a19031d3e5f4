//! Scribe for TEL.

use super::{ParseContext, ScribeResult, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::properties::{Telephone, TelephoneValue};
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::unescape_text;

/// TEL. Numbers are text; a `VALUE=uri` value (4.0 `tel:` URIs) is kept as
/// a URI.
#[derive(Debug, Default)]
pub struct TelephoneScribe;

impl TypedScribe for TelephoneScribe {
    type Property = Telephone;

    fn property_name(&self) -> &'static str {
        "TEL"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn data_type(&self, property: &Telephone, version: VCardVersion) -> Option<VCardDataType> {
        match property.value {
            TelephoneValue::Text(_) => Some(VCardDataType::Text),
            TelephoneValue::Uri(_) if version.is_old_style() => Some(VCardDataType::Url),
            TelephoneValue::Uri(_) => Some(VCardDataType::Uri),
        }
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Telephone> {
        if data_type.is_some_and(VCardDataType::is_uri) {
            return Ok(Telephone::uri(value.trim()));
        }
        Ok(Telephone::text(unescape_text(value, ctx.version)))
    }

    fn write_text(&self, property: &Telephone, ctx: &WriteContext<'_>) -> WriteResult {
        match &property.value {
            TelephoneValue::Text(text) => Ok(escape_text(text, ctx.version)),
            TelephoneValue::Uri(uri) => Ok(uri.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_value_type() {
        let mut ctx = ParseContext::new(VCardVersion::V4_0, "TEL");
        let tel = TypedScribe::parse_text(
            &TelephoneScribe,
            "tel:+1-555-555-5555",
            Some(&VCardDataType::Uri),
            &mut VCardParameters::new(),
            &mut ctx,
        )
        .unwrap();
        assert_eq!(tel.value, TelephoneValue::Uri("tel:+1-555-555-5555".into()));
        assert_eq!(
            TypedScribe::data_type(&TelephoneScribe, &tel, VCardVersion::V4_0),
            Some(VCardDataType::Uri)
        );
    }

    #[test]
    fn text_by_default() {
        let mut ctx = ParseContext::new(VCardVersion::V3_0, "TEL");
        let tel = TypedScribe::parse_text(
            &TelephoneScribe,
            "(555) 555-5555",
            Some(&VCardDataType::Text),
            &mut VCardParameters::new(),
            &mut ctx,
        )
        .unwrap();
        assert_eq!(tel.number(), "(555) 555-5555");
    }
}
