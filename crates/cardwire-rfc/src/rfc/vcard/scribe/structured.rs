//! Scribes for N and ADR.

use super::{ParseContext, ScribeResult, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::build::join_structured;
use crate::rfc::vcard::core::parameter::names;
use crate::rfc::vcard::core::properties::{Address, StructuredName};
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::parse_structured;

#[derive(Debug, Default)]
pub struct StructuredNameScribe;

impl TypedScribe for StructuredNameScribe {
    type Property = StructuredName;

    fn property_name(&self) -> &'static str {
        "N"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> ScribeResult<StructuredName> {
        Ok(StructuredName::from_components(parse_structured(value)))
    }

    fn write_text(&self, property: &StructuredName, _ctx: &WriteContext<'_>) -> WriteResult {
        Ok(join_structured(&property.components()))
    }
}

/// ADR. In 2.1 and 3.0 the label is written as a separate LABEL property
/// right after the address, so the LABEL parameter is dropped there.
#[derive(Debug, Default)]
pub struct AddressScribe;

impl TypedScribe for AddressScribe {
    type Property = Address;

    fn property_name(&self) -> &'static str {
        "ADR"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn prepare_parameters(
        &self,
        _property: &Address,
        parameters: &mut VCardParameters,
        ctx: &WriteContext<'_>,
    ) {
        if ctx.version != VCardVersion::V4_0 {
            parameters.remove_all(names::LABEL);
        }
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> ScribeResult<Address> {
        Ok(Address::from_components(parse_structured(value)))
    }

    fn write_text(&self, property: &Address, _ctx: &WriteContext<'_>) -> WriteResult {
        Ok(join_structured(&property.components()))
    }
}
