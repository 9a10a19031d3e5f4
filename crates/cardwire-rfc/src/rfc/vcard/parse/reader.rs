//! Streaming vCard reader.
//!
//! Pulls one vCard at a time from a folded text stream. Problems inside a
//! card are recovered from and reported through [`VCardReader::warnings`];
//! only I/O errors end a read.

use std::io::{BufRead, Cursor};
use std::sync::Arc;

use super::error::{ParseError, ParseErrorKind, ParseWarning};
use super::folded::FoldedLineReader;
use super::lexer::{RawLine, RawLineParser};
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::core::parameter::{names, same_types};
use crate::rfc::vcard::core::properties::{Address, Label};
use crate::rfc::vcard::core::{PropertyKind, VCard, VCardProperty, VCardVersion};
use crate::rfc::vcard::quoted_printable;
use crate::rfc::vcard::scribe::{EmbeddedVCard, ParseContext, ScribeRegistry, ScribeSignal};
use crate::rfc::vcard::settings::ReaderSettings;

/// A vCard being filled in, with the 2.1 embedded property (if any) that
/// waits for the next `BEGIN:VCARD`.
#[derive(Debug)]
struct Frame {
    card: VCard,
    waiting: Option<(EmbeddedVCard, Option<String>)>,
}

impl Frame {
    fn new(version: VCardVersion) -> Self {
        Self {
            card: VCard::with_version(version),
            waiting: None,
        }
    }
}

/// Reads vCards from a text stream.
///
/// ```rust
/// use cardwire_rfc::rfc::vcard::VCardReader;
///
/// let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:John Doe\r\nEND:VCARD\r\n";
/// let mut reader = VCardReader::new(input.as_bytes());
/// let card = reader.read_next().unwrap().unwrap();
/// assert_eq!(card.formatted_name().map(|fname| fname.value.as_str()), Some("John Doe"));
/// assert!(reader.read_next().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct VCardReader<R> {
    lines: Option<FoldedLineReader<R>>,
    parser: RawLineParser,
    registry: Arc<ScribeRegistry>,
    settings: ReaderSettings,
    warnings: Vec<ParseWarning>,
}

impl<R: BufRead> VCardReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_settings(reader, ReaderSettings::default())
    }

    pub fn with_settings(reader: R, settings: ReaderSettings) -> Self {
        Self {
            lines: Some(FoldedLineReader::new(reader)),
            parser: RawLineParser::new(settings.default_version)
                .with_caret_decoding(settings.caret_decoding),
            registry: ScribeRegistry::shared(),
            settings,
            warnings: Vec::new(),
        }
    }

    /// Uses `registry` instead of the standard scribes.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ScribeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Problems found while reading the last vCard.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Reads the next vCard, or `None` at the end of the stream.
    ///
    /// Text outside `BEGIN:VCARD` / `END:VCARD` is ignored. A card cut off
    /// by the end of the stream is returned with a warning.
    ///
    /// ## Errors
    /// Returns an I/O error from the stream, or if the reader is closed.
    #[tracing::instrument(skip(self))]
    pub fn read_next(&mut self) -> RfcResult<Option<VCard>> {
        self.warnings.clear();
        self.parser.set_version(self.settings.default_version);
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let lines = self.lines.as_mut().ok_or_else(|| RfcError::closed("reader"))?;
            let Some(line) = lines.read_line()? else {
                return Ok(self.finish_truncated(stack));
            };
            let line_number = lines.line_number();

            let raw = match self.parser.parse(&line, line_number) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(line = line_number, error = %err, "Skipping unparseable line");
                    if !stack.is_empty() {
                        self.warnings.push(err.into());
                    }
                    continue;
                }
            };
            tracing::trace!(line = line_number, name = %raw.name, "Read content line");

            if raw.is_named("BEGIN") && raw.value.trim().eq_ignore_ascii_case("VCARD") {
                if stack.is_empty() {
                    tracing::debug!(line = line_number, "Start of vCard");
                }
                stack.push(Frame::new(self.parser.version()));
                continue;
            }

            let Some(frame) = stack.last_mut() else {
                tracing::trace!(line = line_number, "Ignoring line outside of a vCard");
                continue;
            };

            if raw.is_named("END") && raw.value.trim().eq_ignore_ascii_case("VCARD") {
                let Some(done) = stack.pop() else {
                    continue;
                };
                let card = self.finish_card(done, line_number);
                match stack.last_mut() {
                    None => {
                        tracing::debug!(line = line_number, "End of vCard");
                        return Ok(Some(card));
                    }
                    Some(parent) => {
                        self.parser.set_version(parent.card.version());
                        self.attach_nested(parent, card, line_number);
                    }
                }
                continue;
            }

            if raw.is_named("VERSION") {
                frame.card.set_version(self.parser.version());
                continue;
            }

            self.read_property(frame, raw, line_number);
        }
    }

    /// Reads every remaining vCard. Warnings are not kept.
    ///
    /// ## Errors
    /// See [`VCardReader::read_next`].
    pub fn read_all(&mut self) -> RfcResult<Vec<VCard>> {
        let mut cards = Vec::new();
        while let Some(card) = self.read_next()? {
            cards.push(card);
        }
        Ok(cards)
    }

    /// Drops the wrapped stream. Later reads fail.
    pub fn close(&mut self) {
        if self.lines.take().is_some() {
            tracing::debug!("Closed vCard reader");
        }
    }

    fn read_property(&mut self, frame: &mut Frame, raw: RawLine, line_number: usize) {
        let RawLine {
            group,
            name,
            mut parameters,
            value,
        } = raw;
        let version = frame.card.version();

        let value = if parameters.is_quoted_printable() {
            let label = parameters.charset();
            let charset = match label.map(|label| (label, quoted_printable::charset(label))) {
                Some((_, Some(charset))) => charset,
                Some((label, None)) => {
                    tracing::warn!(charset = label, property = %name, "Unknown charset");
                    self.warnings.push(ParseWarning::new(
                        Some(line_number),
                        Some(&name),
                        format!(
                            "unknown charset {label}, using {}",
                            self.settings.quoted_printable_charset.name()
                        ),
                    ));
                    self.settings.quoted_printable_charset
                }
                None => self.settings.quoted_printable_charset,
            };
            parameters.set_encoding(None);
            parameters.set_charset(None);
            quoted_printable::decode(&value, charset)
        } else {
            value
        };

        let scribe = Arc::clone(self.registry.resolve_name(&name));
        let data_type = parameters
            .value_type()
            .or_else(|| scribe.default_data_type(version));
        parameters.remove_all(names::VALUE);

        let mut ctx = ParseContext::new(version, name.clone());
        ctx.line_number = Some(line_number);

        match scribe.parse_text(&value, data_type.as_ref(), parameters.clone(), &mut ctx) {
            Ok(mut property) => {
                property.set_group(group);
                frame.card.add_property(property);
            }
            Err(ScribeSignal::Skip(reason)) => {
                tracing::debug!(property = %name, %reason, "Skipping property");
            }
            Err(ScribeSignal::CannotParse(reason)) => {
                tracing::warn!(property = %name, %reason, "Keeping property as raw text");
                ctx.warn(format!("{reason}; kept as an extended property"));
                let raw = self
                    .registry
                    .raw()
                    .parse_text(&value, data_type.as_ref(), parameters, &mut ctx);
                if let Ok(mut property) = raw {
                    property.set_group(group);
                    frame.card.add_property(property);
                }
            }
            Err(ScribeSignal::Embedded(embedded)) => {
                self.read_embedded(frame, embedded, group, &mut ctx);
            }
        }

        for message in ctx.warnings {
            self.warnings
                .push(ParseWarning::new(Some(line_number), Some(&name), message));
        }
    }

    fn read_embedded(
        &mut self,
        frame: &mut Frame,
        mut embedded: EmbeddedVCard,
        group: Option<String>,
        ctx: &mut ParseContext,
    ) {
        let Some(text) = embedded.inline.take() else {
            if frame.waiting.is_some() {
                ctx.warn("previous embedded vCard never started");
            }
            frame.waiting = Some((embedded, group));
            return;
        };

        let settings = ReaderSettings {
            default_version: ctx.version,
            ..self.settings.clone()
        };
        let mut nested = VCardReader::with_settings(Cursor::new(text.into_bytes()), settings)
            .with_registry(Arc::clone(&self.registry));
        let card = match nested.read_next() {
            Ok(Some(card)) => card,
            Ok(None) => {
                ctx.warn("embedded vCard is empty");
                return;
            }
            Err(err) => {
                ctx.warn(format!("embedded vCard could not be read: {err}"));
                return;
            }
        };
        for warning in nested.warnings() {
            ctx.warn(format!("nested vCard: {warning}"));
        }

        let mut property = embedded.property;
        (embedded.injector)(property.as_mut(), card);
        property.set_group(group);
        frame.card.add_property(property);
    }

    fn attach_nested(&mut self, parent: &mut Frame, card: VCard, line_number: usize) {
        let Some((embedded, group)) = parent.waiting.take() else {
            self.warnings.push(ParseWarning::new(
                Some(line_number),
                None,
                "nested vCard has no property to belong to and was dropped",
            ));
            return;
        };
        let mut property = embedded.property;
        (embedded.injector)(property.as_mut(), card);
        property.set_group(group);
        parent.card.add_property(property);
    }

    /// Moves LABEL properties onto the first address with the same TYPE
    /// values that has no label yet. The rest stay as LABEL properties.
    fn finish_card(&mut self, mut frame: Frame, line_number: usize) -> VCard {
        if let Some((embedded, _)) = frame.waiting.take() {
            self.warnings.push(ParseWarning::new(
                Some(line_number),
                None,
                format!(
                    "{} property is missing its embedded vCard",
                    embedded.property.kind()
                ),
            ));
        }

        let card = &mut frame.card;
        for label in card.remove_all(PropertyKind::LABEL) {
            let Some(text) = label.as_any().downcast_ref::<Label>() else {
                card.add_property(label);
                continue;
            };
            let types = text.parameters().types();
            let target = card
                .get_all_mut::<Address>()
                .into_iter()
                .find(|adr| adr.label().is_none() && same_types(adr.types(), types));
            match target {
                Some(address) => address.set_label(Some(&text.value)),
                None => card.add_property(label),
            }
        }
        frame.card
    }

    fn finish_truncated(&mut self, mut stack: Vec<Frame>) -> Option<VCard> {
        let line = self.lines.as_ref().map_or(0, FoldedLineReader::line_number);
        while let Some(frame) = stack.pop() {
            self.warnings.push(
                ParseError::new(
                    ParseErrorKind::UnexpectedEof,
                    line,
                    "vCard is missing END:VCARD",
                )
                .into(),
            );
            let card = self.finish_card(frame, line);
            match stack.last_mut() {
                None => return Some(card),
                Some(parent) => self.attach_nested(parent, card, line),
            }
        }
        None
    }
}
