//! Extension and unrecognized properties.

use crate::property_common;
use crate::rfc::vcard::core::{
    PropertyBase, PropertyKind, PropertyType, VCardDataType, VCardProperty,
};

/// A property kept verbatim: its name and undecoded value.
///
/// Holds every `X-` property, every property without a registered scribe,
/// and every property whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    pub base: PropertyBase,
    /// Property name as read (case preserved).
    pub name: String,
    pub value: String,
    /// The VALUE parameter the property was read with, if any.
    pub data_type: Option<VCardDataType>,
}

impl RawProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: PropertyBase::default(),
            name: name.into(),
            value: value.into(),
            data_type: None,
        }
    }

    /// Returns whether the property has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl PropertyType for RawProperty {
    const KIND: PropertyKind = PropertyKind::RAW;
}

impl VCardProperty for RawProperty {
    property_common!();
}
