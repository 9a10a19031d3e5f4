//! Typed reader and writer settings.
//!
//! Built with defaults, or converted from the string-typed
//! [`cardwire_core::config`] sections.

use cardwire_core::config::{ReaderConfig, WriterConfig};
use cardwire_core::error::CoreError;
use encoding_rs::Encoding;

use super::build::FoldingOptions;
use super::core::VCardVersion;
use super::quoted_printable;
use crate::error::{RfcError, RfcResult};

#[derive(Debug, Clone)]
pub struct ReaderSettings {
    /// Version assumed until a VERSION line is read.
    pub default_version: VCardVersion,
    pub caret_decoding: bool,
    /// Charset for quoted-printable values without a CHARSET parameter.
    pub quoted_printable_charset: &'static Encoding,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            default_version: VCardVersion::V2_1,
            caret_decoding: true,
            quoted_printable_charset: encoding_rs::UTF_8,
        }
    }
}

impl TryFrom<&ReaderConfig> for ReaderSettings {
    type Error = RfcError;

    fn try_from(config: &ReaderConfig) -> RfcResult<Self> {
        let charset = quoted_printable::charset(&config.quoted_printable_charset).ok_or_else(|| {
            CoreError::InvalidConfiguration(format!(
                "unknown charset: {}",
                config.quoted_printable_charset
            ))
        })?;
        Ok(Self {
            default_version: config.default_version.parse()?,
            caret_decoding: config.caret_decoding,
            quoted_printable_charset: charset,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WriterSettings {
    pub version: VCardVersion,
    pub folding: FoldingOptions,
    pub caret_encoding: bool,
    /// Leave out properties the target version does not define.
    pub version_strict: bool,
    /// Write a PRODID naming this library (3.0 and 4.0).
    pub add_prodid: bool,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            version: VCardVersion::V3_0,
            folding: FoldingOptions::default(),
            caret_encoding: false,
            version_strict: true,
            add_prodid: true,
        }
    }
}

impl WriterSettings {
    #[must_use]
    pub fn for_version(version: VCardVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }
}

impl TryFrom<&WriterConfig> for WriterSettings {
    type Error = RfcError;

    fn try_from(config: &WriterConfig) -> RfcResult<Self> {
        let folding = FoldingOptions {
            line_length: config.fold_lines.then_some(config.line_length),
            indent: config.indent.clone(),
            newline: config.newline.as_str().to_string(),
        };
        folding.validate()?;
        Ok(Self {
            version: config.version.parse()?,
            folding,
            caret_encoding: config.caret_encoding,
            version_strict: config.version_strict,
            add_prodid: config.add_prodid,
        })
    }
}

#[cfg(test)]
mod tests {
    use cardwire_core::config::{Newline, Settings};

    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let settings = Settings::default();
        let reader = ReaderSettings::try_from(&settings.reader).unwrap();
        assert_eq!(reader.default_version, VCardVersion::V2_1);
        assert!(reader.caret_decoding);
        assert_eq!(reader.quoted_printable_charset, encoding_rs::UTF_8);

        let writer = WriterSettings::try_from(&settings.writer).unwrap();
        let expected = WriterSettings::default();
        assert_eq!(writer.version, expected.version);
        assert_eq!(writer.folding, expected.folding);
        assert_eq!(writer.caret_encoding, expected.caret_encoding);
        assert_eq!(writer.add_prodid, expected.add_prodid);
    }

    #[test]
    fn conversion_errors() {
        let reader = ReaderConfig {
            default_version: "5.0".to_string(),
            ..ReaderConfig::default()
        };
        assert!(matches!(
            ReaderSettings::try_from(&reader),
            Err(RfcError::CoreError(_))
        ));

        let reader = ReaderConfig {
            quoted_printable_charset: "no-such-charset".to_string(),
            ..ReaderConfig::default()
        };
        assert!(ReaderSettings::try_from(&reader).is_err());

        let writer = WriterConfig {
            line_length: 1,
            ..WriterConfig::default()
        };
        assert!(matches!(
            WriterSettings::try_from(&writer),
            Err(RfcError::InvalidSettings(_))
        ));
    }

    #[test]
    fn unfolded_lf_writer() {
        let writer = WriterConfig {
            fold_lines: false,
            newline: Newline::Lf,
            version: "4.0".to_string(),
            ..WriterConfig::default()
        };
        let settings = WriterSettings::try_from(&writer).unwrap();
        assert_eq!(settings.folding.line_length, None);
        assert_eq!(settings.folding.newline, "\n");
        assert_eq!(settings.version, VCardVersion::V4_0);
    }
}
