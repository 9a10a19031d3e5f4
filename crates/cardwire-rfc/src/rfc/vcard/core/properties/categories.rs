//! CATEGORIES property.

use crate::property_common;
use crate::rfc::vcard::core::property::SINCE_3_0;
use crate::rfc::vcard::core::{
    HasAltId, PropertyBase, PropertyKind, PropertyType, VCardProperty, VCardVersion,
};

/// A list of tags (`CATEGORIES:work,friends`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub base: PropertyBase,
    pub values: Vec<String>,
}

impl Categories {
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: PropertyBase::default(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl PropertyType for Categories {
    const KIND: PropertyKind = PropertyKind::CATEGORIES;
}

impl HasAltId for Categories {}

impl VCardProperty for Categories {
    property_common!();

    fn supported_versions(&self) -> &'static [VCardVersion] {
        SINCE_3_0
    }

    fn supports_alt_id(&self) -> bool {
        true
    }

    fn validate_value(&self, _version: VCardVersion, warnings: &mut Vec<String>) {
        if self.values.is_empty() {
            warnings.push("categories list is empty".to_string());
        }
    }
}
