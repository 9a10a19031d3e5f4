//! Scribe for CATEGORIES.

use super::{ParseContext, ScribeResult, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::build::join_list;
use crate::rfc::vcard::core::properties::Categories;
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::split_component;

#[derive(Debug, Default)]
pub struct CategoriesScribe;

impl TypedScribe for CategoriesScribe {
    type Property = Categories;

    fn property_name(&self) -> &'static str {
        "CATEGORIES"
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
    ) -> ScribeResult<Categories> {
        Ok(Categories::new(split_component(value)))
    }

    fn write_text(&self, property: &Categories, _ctx: &WriteContext<'_>) -> WriteResult {
        Ok(join_list(&property.values))
    }
}
