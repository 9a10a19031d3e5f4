//! vCard parse error types.

use std::fmt;

/// Result type for vCard parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during vCard parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a malformed line error carrying the offending text.
    #[must_use]
    pub fn malformed(line: usize, text: &str) -> Self {
        Self::new(
            ParseErrorKind::MalformedLine,
            line,
            format!("could not parse line: {text}"),
        )
    }

    /// Creates an unsupported version error.
    #[must_use]
    pub fn unsupported_version(line: usize, value: &str) -> Self {
        Self::new(
            ParseErrorKind::UnsupportedVersion,
            line,
            format!("unsupported version: {value}"),
        )
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, line, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected end of input.
    UnexpectedEof,
    /// The line has no property name or no value.
    MalformedLine,
    /// Invalid property value.
    InvalidValue,
    /// Unsupported vCard version.
    UnsupportedVersion,
    /// Encoding error.
    EncodingError,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::MalformedLine => write!(f, "malformed line"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::UnsupportedVersion => write!(f, "unsupported version"),
            Self::EncodingError => write!(f, "encoding error"),
        }
    }
}

/// A recovered problem, reported alongside the vCard it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Line the problem was found on (1-based), if known.
    pub line: Option<usize>,
    /// Name of the property involved, if any.
    pub property: Option<String>,
    pub message: String,
}

impl ParseWarning {
    #[must_use]
    pub fn new(line: Option<usize>, property: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            line,
            property: property.map(String::from),
            message: message.into(),
        }
    }
}

impl From<ParseError> for ParseWarning {
    fn from(err: ParseError) -> Self {
        Self {
            line: Some(err.line),
            property: None,
            message: format!("{}: {}", err.kind, err.message),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, &self.property) {
            (Some(line), Some(property)) => write!(f, "line {line} ({property}): ")?,
            (Some(line), None) => write!(f, "line {line}: ")?,
            (None, Some(property)) => write!(f, "{property}: ")?,
            (None, None) => {}
        }
        f.write_str(&self.message)
    }
}
