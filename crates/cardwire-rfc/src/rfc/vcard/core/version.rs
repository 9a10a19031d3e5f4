//! vCard version.

use std::fmt;

use cardwire_core::constants::{VERSION_2_1, VERSION_3_0, VERSION_4_0};

/// vCard version.
///
/// The version decides how lines are escaped, whether parameter values may be
/// quoted and which data type a property falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (de facto standard, versit consortium).
    #[default]
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    V4_0,
}

impl VCardVersion {
    /// All versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V2_1, Self::V3_0, Self::V4_0];

    /// Parses from version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            VERSION_2_1 => Some(Self::V2_1),
            VERSION_3_0 => Some(Self::V3_0),
            VERSION_4_0 => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => VERSION_2_1,
            Self::V3_0 => VERSION_3_0,
            Self::V4_0 => VERSION_4_0,
        }
    }

    /// Returns whether this version uses the 2.1 ("old style") grammar:
    /// no quoted parameter values, no comma-separated parameter lists and
    /// positional TYPE parameters.
    #[must_use]
    pub const fn is_old_style(self) -> bool {
        matches!(self, Self::V2_1)
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for VCardVersion {
    type Err = cardwire_core::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            cardwire_core::error::CoreError::InvalidConfiguration(format!(
                "unknown vCard version: {s}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parse() {
        assert_eq!(VCardVersion::parse("2.1"), Some(VCardVersion::V2_1));
        assert_eq!(VCardVersion::parse(" 3.0 "), Some(VCardVersion::V3_0));
        assert_eq!(VCardVersion::parse("4.0"), Some(VCardVersion::V4_0));
        assert_eq!(VCardVersion::parse("5.0"), None);
    }

    #[test]
    fn version_from_str_rejects_unknown() {
        assert!("3.1".parse::<VCardVersion>().is_err());
        assert_eq!("4.0".parse::<VCardVersion>().unwrap(), VCardVersion::V4_0);
    }

    #[test]
    fn only_2_1_is_old_style() {
        assert!(VCardVersion::V2_1.is_old_style());
        assert!(!VCardVersion::V3_0.is_old_style());
        assert!(!VCardVersion::V4_0.is_old_style());
    }
}
