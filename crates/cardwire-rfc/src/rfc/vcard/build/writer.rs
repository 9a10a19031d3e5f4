//! Streaming vCard writer.

use std::io::Write;
use std::sync::Arc;

use cardwire_core::constants::PRODUCT_ID;

use super::escape::escape_text;
use super::fold::{FoldedLineWriter, FoldingOptions};
use super::line_writer::RawLineWriter;
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::core::parameter::names;
use crate::rfc::vcard::core::properties::{Address, Label};
use crate::rfc::vcard::core::{PropertyKind, VCard, VCardParameters, VCardProperty, VCardVersion};
use crate::rfc::vcard::scribe::{ScribeRegistry, WriteContext, WriteSignal};
use crate::rfc::vcard::settings::WriterSettings;

/// Writes vCards to a stream in one target version.
///
/// Each card is rendered in full before any of it reaches the stream, so a
/// card that fails to write leaves the stream untouched.
///
/// ```rust
/// use cardwire_rfc::rfc::vcard::core::{VCard, properties::FormattedName};
/// use cardwire_rfc::rfc::vcard::{VCardWriter, WriterSettings};
///
/// let mut card = VCard::new();
/// card.add(FormattedName::new("Jane Doe"));
///
/// let mut settings = WriterSettings::default();
/// settings.add_prodid = false;
/// let mut writer = VCardWriter::with_settings(Vec::new(), settings);
/// writer.write(&card).unwrap();
///
/// let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(text, "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nEND:VCARD\r\n");
/// ```
#[derive(Debug)]
pub struct VCardWriter<W> {
    writer: Option<W>,
    registry: Arc<ScribeRegistry>,
    settings: WriterSettings,
}

impl<W: Write> VCardWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_settings(writer, WriterSettings::default())
    }

    pub fn with_settings(writer: W, settings: WriterSettings) -> Self {
        Self {
            writer: Some(writer),
            registry: ScribeRegistry::shared(),
            settings,
        }
    }

    /// Uses `registry` instead of the standard scribes.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ScribeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.settings.version
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.settings.version = version;
    }

    /// Writes one vCard.
    ///
    /// ## Errors
    /// Returns a [`WriteError`](super::WriteError) if a group, name or
    /// parameter cannot be written in the target version, an error for
    /// invalid folding settings, or an I/O error (also when the writer is
    /// closed).
    #[tracing::instrument(skip(self, card), fields(version = %self.settings.version))]
    pub fn write(&mut self, card: &VCard) -> RfcResult<()> {
        if self.writer.is_none() {
            return Err(RfcError::closed("writer"));
        }

        let rendered = self.render(card, self.settings.folding.clone(), false)?;
        let writer = self.writer.as_mut().ok_or_else(|| RfcError::closed("writer"))?;
        writer.write_all(&rendered)?;
        tracing::debug!(bytes = rendered.len(), "Wrote vCard");
        Ok(())
    }

    /// ## Errors
    /// Returns an I/O error from the stream, or if the writer is closed.
    pub fn flush(&mut self) -> RfcResult<()> {
        let writer = self.writer.as_mut().ok_or_else(|| RfcError::closed("writer"))?;
        writer.flush()?;
        Ok(())
    }

    /// Flushes and drops the wrapped stream. Closing twice is a no-op.
    ///
    /// ## Errors
    /// Returns an I/O error from the final flush.
    pub fn close(&mut self) -> RfcResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            tracing::debug!("Closed vCard writer");
        }
        Ok(())
    }

    /// Flushes and returns the wrapped stream.
    ///
    /// ## Errors
    /// Returns an I/O error from the flush, or if the writer is closed.
    pub fn into_inner(mut self) -> RfcResult<W> {
        let mut writer = self.writer.take().ok_or_else(|| RfcError::closed("writer"))?;
        writer.flush()?;
        Ok(writer)
    }

    fn render(&self, card: &VCard, folding: FoldingOptions, nested: bool) -> RfcResult<Vec<u8>> {
        let folded = FoldedLineWriter::new(Vec::new(), folding)?;
        let mut lines = RawLineWriter::new(folded, self.settings.version)
            .with_caret_encoding(self.settings.caret_encoding);
        self.write_card(card, &mut lines, nested)?;
        Ok(lines.into_inner().into_inner())
    }

    fn write_card(
        &self,
        card: &VCard,
        lines: &mut RawLineWriter<Vec<u8>>,
        nested: bool,
    ) -> RfcResult<()> {
        let version = self.settings.version;
        let empty = VCardParameters::new();

        lines.write_line(None, "BEGIN", &empty, "VCARD")?;
        lines.write_line(None, "VERSION", &empty, version.as_str())?;

        let add_prodid = self.settings.add_prodid && !nested && version != VCardVersion::V2_1;
        if add_prodid {
            lines.write_line(None, "PRODID", &empty, &escape_text(PRODUCT_ID, version))?;
        }

        for property in card.iter() {
            if add_prodid && property.kind() == PropertyKind::PRODUCT_ID {
                continue;
            }
            if self.settings.version_strict && !property.is_supported_by(version) {
                tracing::debug!(
                    property = %property.kind(),
                    %version,
                    "Property not supported in target version, skipping"
                );
                continue;
            }
            self.write_property(property, card, lines)?;

            if version == VCardVersion::V4_0 {
                continue;
            }
            let label = property
                .as_any()
                .downcast_ref::<Address>()
                .and_then(|adr| adr.label().map(|text| (adr, text)));
            if let Some((address, text)) = label {
                let mut label = Label::new(text);
                for value in address.types() {
                    label.base.parameters.add_type(value.clone());
                }
                self.write_property(&label, card, lines)?;
            }
        }

        lines.write_line(None, "END", &empty, "VCARD")?;
        Ok(())
    }

    fn write_property(
        &self,
        property: &dyn VCardProperty,
        card: &VCard,
        lines: &mut RawLineWriter<Vec<u8>>,
    ) -> RfcResult<()> {
        let version = self.settings.version;
        let scribe = self.registry.resolve_kind(property.kind());
        let ctx = WriteContext { version, card };

        let value = match scribe.write_text(property, &ctx) {
            Ok(value) => Ok(value),
            Err(WriteSignal::Skip(reason)) => {
                tracing::debug!(property = %property.kind(), %reason, "Skipping property");
                return Ok(());
            }
            Err(WriteSignal::Embedded(nested)) => Err(nested),
        };

        let mut parameters = scribe.prepare_parameters(property, &ctx);
        let data_type = scribe.data_type(property, version);
        let default = scribe.default_data_type(version);
        match data_type {
            Some(data_type)
                if !default.as_ref().is_some_and(|default| default.same_as(&data_type)) =>
            {
                parameters.replace(names::VALUE, data_type.wire_name(version));
            }
            _ => {
                parameters.remove_all(names::VALUE);
            }
        }
        let name = scribe.wire_name(property);

        let nested = match value {
            Ok(value) => return lines.write_line(property.group(), &name, &parameters, &value),
            Err(nested) => nested,
        };
        if version == VCardVersion::V2_1 {
            lines.write_line(property.group(), &name, &parameters, "")?;
            return self.write_card(&nested, lines, true);
        }

        let text = self.render(&nested, unfolded_lf(), true)?;
        let text = String::from_utf8_lossy(&text);
        let escaped = escape_text(text.trim_end(), version);
        lines.write_line(property.group(), &name, &parameters, &escaped)
    }
}

fn unfolded_lf() -> FoldingOptions {
    FoldingOptions {
        newline: "\n".to_string(),
        ..FoldingOptions::unfolded()
    }
}
