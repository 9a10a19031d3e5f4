//! PHOTO property.

use crate::property_common;
use crate::rfc::vcard::core::{
    HasAltId, PropertyBase, PropertyKind, PropertyType, VCardProperty, VCardVersion,
};

/// Where the image data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Url(String),
    Inline(Vec<u8>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Photo {
    pub base: PropertyBase,
    pub source: Option<PhotoSource>,
    /// Media type, either a bare subtype (`jpeg`) or a full MIME type.
    pub content_type: Option<String>,
}

impl Photo {
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source: Some(PhotoSource::Url(url.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn inline(data: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            source: Some(PhotoSource::Inline(data)),
            content_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        match &self.source {
            Some(PhotoSource::Inline(data)) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn url_value(&self) -> Option<&str> {
        match &self.source {
            Some(PhotoSource::Url(url)) => Some(url),
            _ => None,
        }
    }

    /// The full MIME type (`image/jpeg`) for a `data:` URI.
    #[must_use]
    pub fn mime_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            if ct.contains('/') {
                ct.to_ascii_lowercase()
            } else {
                format!("image/{}", ct.to_ascii_lowercase())
            }
        })
    }
}

impl PropertyType for Photo {
    const KIND: PropertyKind = PropertyKind::PHOTO;
}

impl HasAltId for Photo {}

impl VCardProperty for Photo {
    property_common!();

    fn supports_alt_id(&self) -> bool {
        true
    }

    fn validate_value(&self, _version: VCardVersion, warnings: &mut Vec<String>) {
        if self.source.is_none() {
            warnings.push("photo has neither a URL nor inline data".to_string());
        }
    }
}
