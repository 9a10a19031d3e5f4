//! Scribe for single-text properties (FN, NOTE, TITLE, ...).

use std::marker::PhantomData;

use super::{ParseContext, ScribeResult, TypedScribe, WriteContext, WriteResult};
use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::{TextValued, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::unescape_text;

/// Reads and writes a [`TextValued`] property under a fixed name.
#[derive(Debug)]
pub struct TextScribe<P> {
    name: &'static str,
    _property: PhantomData<fn() -> P>,
}

impl<P> TextScribe<P> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _property: PhantomData,
        }
    }
}

impl<P: TextValued> TypedScribe for TextScribe<P> {
    type Property = P;

    fn property_name(&self) -> &'static str {
        self.name
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<P> {
        Ok(P::from_text(unescape_text(value, ctx.version)))
    }

    fn write_text(&self, property: &P, ctx: &WriteContext<'_>) -> WriteResult {
        Ok(escape_text(property.text(), ctx.version))
    }
}
