//! Property value data types (the VALUE parameter).

use std::fmt;

use super::version::VCardVersion;

/// The data type of a property value.
///
/// Names compare case-insensitively; unrecognized names are kept in
/// [`VCardDataType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VCardDataType {
    Binary,
    Boolean,
    /// Reference to a MIME body part (`CID` / `CONTENT-ID`, 2.1 only).
    ContentId,
    Date,
    DateTime,
    DateAndOrTime,
    Float,
    /// Inline data (2.1 only).
    Inline,
    Integer,
    LanguageTag,
    Text,
    Time,
    Timestamp,
    Uri,
    /// `URL`, the 2.1 spelling of [`VCardDataType::Uri`].
    Url,
    UtcOffset,
    /// An embedded vCard (3.0 AGENT).
    VCard,
    Other(String),
}

impl VCardDataType {
    /// Looks up a known data type by name.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        let found = match name.trim().to_ascii_lowercase().as_str() {
            "binary" => Self::Binary,
            "boolean" => Self::Boolean,
            "cid" | "content-id" => Self::ContentId,
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "date-and-or-time" => Self::DateAndOrTime,
            "float" => Self::Float,
            "inline" => Self::Inline,
            "integer" => Self::Integer,
            "language-tag" => Self::LanguageTag,
            "text" => Self::Text,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "uri" => Self::Uri,
            "url" => Self::Url,
            "utc-offset" => Self::UtcOffset,
            "vcard" => Self::VCard,
            _ => return None,
        };
        Some(found)
    }

    /// Parses a VALUE parameter, keeping unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::find(name).unwrap_or_else(|| Self::Other(name.to_string()))
    }

    /// Returns whether the value is a URI, in either spelling.
    #[must_use]
    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri | Self::Url)
    }

    /// Returns the canonical (lower-case) name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::ContentId => "content-id",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Float => "float",
            Self::Inline => "inline",
            Self::Integer => "integer",
            Self::LanguageTag => "language-tag",
            Self::Text => "text",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::UtcOffset => "utc-offset",
            Self::VCard => "vcard",
            Self::Other(name) => name,
        }
    }

    /// Returns the name to put in a VALUE parameter for the given version.
    ///
    /// 2.1 spells URIs `URL` and uses upper case throughout.
    #[must_use]
    pub fn wire_name(&self, version: VCardVersion) -> String {
        match (self, version) {
            (Self::Uri | Self::Url, VCardVersion::V2_1) => "URL".to_string(),
            (Self::Url, _) => "uri".to_string(),
            (Self::Other(name), _) => name.clone(),
            (other, VCardVersion::V2_1) => other.as_str().to_ascii_uppercase(),
            (other, _) => other.as_str().to_string(),
        }
    }

    /// Returns whether two data types denote the same thing on the wire.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (a, b) if a.is_uri() && b.is_uri() => true,
            (Self::Other(a), Self::Other(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for VCardDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
