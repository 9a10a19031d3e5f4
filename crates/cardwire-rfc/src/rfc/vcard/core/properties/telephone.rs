//! TEL property.

use crate::property_common;
use crate::rfc::vcard::core::{
    HasAltId, PropertyBase, PropertyKind, PropertyType, VCardProperty, VCardVersion,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelephoneValue {
    /// Free-form number text.
    Text(String),
    /// A `tel:` URI (4.0).
    Uri(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telephone {
    pub base: PropertyBase,
    pub value: TelephoneValue,
}

impl Telephone {
    #[must_use]
    pub fn text(number: impl Into<String>) -> Self {
        Self {
            base: PropertyBase::default(),
            value: TelephoneValue::Text(number.into()),
        }
    }

    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            base: PropertyBase::default(),
            value: TelephoneValue::Uri(uri.into()),
        }
    }

    /// Returns the number, stripping any `tel:` scheme.
    #[must_use]
    pub fn number(&self) -> &str {
        match &self.value {
            TelephoneValue::Text(text) => text,
            TelephoneValue::Uri(uri) => uri
                .get(..4)
                .filter(|scheme| scheme.eq_ignore_ascii_case("tel:"))
                .map_or(uri.as_str(), |_| &uri[4..]),
        }
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        self.base.parameters.types()
    }
}

impl PropertyType for Telephone {
    const KIND: PropertyKind = PropertyKind::TELEPHONE;
}

impl HasAltId for Telephone {}

impl VCardProperty for Telephone {
    property_common!();

    fn supports_alt_id(&self) -> bool {
        true
    }

    fn validate_value(&self, version: VCardVersion, warnings: &mut Vec<String>) {
        match &self.value {
            TelephoneValue::Text(text) if text.trim().is_empty() => {
                warnings.push("telephone number is empty".to_string());
            }
            TelephoneValue::Uri(_) if version != VCardVersion::V4_0 => {
                warnings.push(format!("URI telephone values are not supported in {version}"));
            }
            _ => {}
        }
    }
}
