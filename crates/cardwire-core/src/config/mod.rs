use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_INDENT, DEFAULT_LINE_LENGTH, DEFAULT_QUOTED_PRINTABLE_CHARSET,
    DEFAULT_READ_VERSION, DEFAULT_WRITE_VERSION, ENV_PREFIX,
};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}

/// Line terminator emitted by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Newline {
    #[default]
    Crlf,
    Lf,
    Cr,
}

impl Newline {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Crlf => "crlf",
            Self::Lf => "lf",
            Self::Cr => "cr",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Version assumed until a VERSION line says otherwise.
    pub default_version: String,
    /// Decode RFC 6868 `^` sequences in 3.0/4.0 parameter values.
    pub caret_decoding: bool,
    /// Charset used for quoted-printable values that carry no CHARSET parameter.
    pub quoted_printable_charset: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_READ_VERSION.to_string(),
            caret_decoding: true,
            quoted_printable_charset: DEFAULT_QUOTED_PRINTABLE_CHARSET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub version: String,
    pub fold_lines: bool,
    pub line_length: usize,
    pub indent: String,
    pub newline: Newline,
    pub caret_encoding: bool,
    /// Drop properties the target version does not define.
    pub version_strict: bool,
    pub add_prodid: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_WRITE_VERSION.to_string(),
            fold_lines: true,
            line_length: DEFAULT_LINE_LENGTH,
            indent: DEFAULT_INDENT.to_string(),
            newline: Newline::Crlf,
            caret_encoding: false,
            version_strict: true,
            add_prodid: true,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads settings from defaults, `CARDWIRE__*` environment variables and
    /// an optional `cardwire.toml` in the working directory.
    /// Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or has wrong types.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let reader = ReaderConfig::default();
        let writer = WriterConfig::default();

        Ok(Config::builder()
            .set_default("reader.default_version", reader.default_version)?
            .set_default("reader.caret_decoding", reader.caret_decoding)?
            .set_default(
                "reader.quoted_printable_charset",
                reader.quoted_printable_charset,
            )?
            .set_default("writer.version", writer.version)?
            .set_default("writer.fold_lines", writer.fold_lines)?
            .set_default("writer.line_length", u64::try_from(writer.line_length)?)?
            .set_default("writer.indent", writer.indent)?
            .set_default("writer.newline", writer.newline.name())?
            .set_default("writer.caret_encoding", writer.caret_encoding)?
            .set_default("writer.version_strict", writer.version_strict)?
            .set_default("writer.add_prodid", writer.add_prodid)?)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and `cardwire.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
