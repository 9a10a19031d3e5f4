//! AGENT property (2.1/3.0).

use crate::property_common;
use crate::rfc::vcard::core::property::UNTIL_3_0;
use crate::rfc::vcard::core::{
    PropertyBase, PropertyKind, PropertyType, VCard, VCardProperty, VCardVersion,
};

/// Someone who acts on behalf of the vCard's subject, given either as a
/// URL or as a complete embedded vCard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agent {
    pub base: PropertyBase,
    pub url: Option<String>,
    pub vcard: Option<VCard>,
}

impl Agent {
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn vcard(vcard: VCard) -> Self {
        Self {
            vcard: Some(vcard),
            ..Self::default()
        }
    }
}

impl PropertyType for Agent {
    const KIND: PropertyKind = PropertyKind::AGENT;
}

impl VCardProperty for Agent {
    property_common!();

    fn supported_versions(&self) -> &'static [VCardVersion] {
        UNTIL_3_0
    }

    fn validate_value(&self, version: VCardVersion, warnings: &mut Vec<String>) {
        match (&self.url, &self.vcard) {
            (None, None) => warnings.push("agent has neither a URL nor a vCard".to_string()),
            (_, Some(vcard)) => {
                for group in vcard.validate(version).groups() {
                    for warning in &group.warnings {
                        warnings.push(format!("embedded vCard: {warning}"));
                    }
                }
            }
            (Some(_), None) => {}
        }
    }
}
