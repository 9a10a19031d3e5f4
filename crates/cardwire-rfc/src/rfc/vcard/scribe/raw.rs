//! Scribe for extension and unrecognized properties.

use super::{ParseContext, ScribeResult, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::core::properties::RawProperty;
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};

/// Keeps values verbatim. The registry falls back to it for every name it
/// does not know.
#[derive(Debug, Default)]
pub struct RawPropertyScribe;

impl TypedScribe for RawPropertyScribe {
    type Property = RawProperty;

    fn property_name(&self) -> &'static str {
        ""
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        None
    }

    fn data_type(&self, property: &RawProperty, _version: VCardVersion) -> Option<VCardDataType> {
        property.data_type.clone()
    }

    fn wire_name(&self, property: &RawProperty) -> String {
        property.name.clone()
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<RawProperty> {
        let mut property = RawProperty::new(ctx.property_name.clone(), value);
        property.data_type = data_type.cloned();
        Ok(property)
    }

    fn write_text(&self, property: &RawProperty, _ctx: &WriteContext<'_>) -> WriteResult {
        Ok(property.value.clone())
    }
}
