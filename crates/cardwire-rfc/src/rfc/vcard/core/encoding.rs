//! Value encodings (the ENCODING parameter).

use std::fmt;

/// Transfer encoding of a property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `QUOTED-PRINTABLE` (2.1).
    QuotedPrintable,
    /// `BASE64` (2.1).
    Base64,
    /// `b` (3.0).
    B,
    /// `7BIT` (2.1).
    SevenBit,
    /// `8BIT` (2.1).
    EightBit,
    Other(String),
}

impl Encoding {
    /// Looks up a known encoding by name (case-insensitive).
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        let name = name.trim();
        let found = if name.eq_ignore_ascii_case("QUOTED-PRINTABLE") {
            Self::QuotedPrintable
        } else if name.eq_ignore_ascii_case("BASE64") {
            Self::Base64
        } else if name.eq_ignore_ascii_case("b") {
            Self::B
        } else if name.eq_ignore_ascii_case("7BIT") {
            Self::SevenBit
        } else if name.eq_ignore_ascii_case("8BIT") {
            Self::EightBit
        } else {
            return None;
        };
        Some(found)
    }

    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::find(name).unwrap_or_else(|| Self::Other(name.to_string()))
    }

    /// Returns whether this is one of the base64 spellings.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        matches!(self, Self::Base64 | Self::B)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::QuotedPrintable => "QUOTED-PRINTABLE",
            Self::Base64 => "BASE64",
            Self::B => "b",
            Self::SevenBit => "7BIT",
            Self::EightBit => "8BIT",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_encodings() {
        assert_eq!(
            Encoding::find("quoted-printable"),
            Some(Encoding::QuotedPrintable)
        );
        assert_eq!(Encoding::find("B"), Some(Encoding::B));
        assert_eq!(Encoding::find("home"), None);
    }

    #[test]
    fn base64_spellings() {
        assert!(Encoding::Base64.is_base64());
        assert!(Encoding::B.is_base64());
        assert!(!Encoding::QuotedPrintable.is_base64());
    }
}
