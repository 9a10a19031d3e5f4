//! Property scribes.
//!
//! A scribe converts one property type between its in-memory form and its
//! text representation. Scribes are written against [`TypedScribe`], which
//! sees concrete property types; the reader and writer only see the
//! object-safe [`PropertyScribe`], which every typed scribe implements.
//!
//! Parsing and writing report the outcomes the reader and writer must treat
//! differently through the `Err` arm: [`ScribeSignal`] and [`WriteSignal`].

mod agent;
mod categories;
mod date;
mod photo;
mod raw;
mod registry;
mod structured;
mod telephone;
mod text;

use std::fmt;

use cardwire_core::constants::XCARD_NAMESPACE;

pub use agent::AgentScribe;
pub use categories::CategoriesScribe;
pub use date::{BirthdayScribe, RevisionScribe};
pub use photo::PhotoScribe;
pub use raw::RawPropertyScribe;
pub use registry::ScribeRegistry;
pub use structured::{AddressScribe, StructuredNameScribe};
pub use telephone::TelephoneScribe;
pub use text::TextScribe;

use crate::rfc::vcard::core::{
    PropertyKind, PropertyType, VCard, VCardDataType, VCardParameters, VCardProperty,
    VCardVersion,
};

/// Outcome of parsing a property value.
pub type ScribeResult<T> = Result<T, ScribeSignal>;

/// Outcome of writing a property value: the value text, or a signal.
pub type WriteResult = Result<String, WriteSignal>;

/// Why a scribe did not produce a property.
#[derive(Debug)]
pub enum ScribeSignal {
    /// Drop the property without a warning.
    Skip(String),
    /// The value is invalid for this type; keep it as a raw property and
    /// record a warning.
    CannotParse(String),
    /// The value is (or introduces) an embedded vCard.
    Embedded(EmbeddedVCard),
}

/// A property waiting for the vCard embedded in it.
pub struct EmbeddedVCard {
    pub property: Box<dyn VCardProperty>,
    /// The embedded vCard's text (3.0), or `None` when it follows in the
    /// stream as the next `BEGIN:VCARD` (2.1).
    pub inline: Option<String>,
    /// Stores the parsed vCard into `property`.
    pub injector: fn(&mut dyn VCardProperty, VCard),
}

impl fmt::Debug for EmbeddedVCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedVCard")
            .field("property", &self.property)
            .field("inline", &self.inline)
            .finish_non_exhaustive()
    }
}

/// Why a scribe did not produce a value.
#[derive(Debug)]
pub enum WriteSignal {
    /// Leave the property out of the output.
    Skip(String),
    /// The value is this vCard; the writer embeds it.
    Embedded(VCard),
}

/// State passed to a scribe while parsing one property.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub version: VCardVersion,
    pub line_number: Option<usize>,
    /// The property name as read.
    pub property_name: String,
    /// Recovered problems, reported with the vCard.
    pub warnings: Vec<String>,
}

impl ParseContext {
    #[must_use]
    pub fn new(version: VCardVersion, property_name: impl Into<String>) -> Self {
        Self {
            version,
            line_number: None,
            property_name: property_name.into(),
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// State passed to a scribe while writing one property.
#[derive(Debug, Clone, Copy)]
pub struct WriteContext<'a> {
    pub version: VCardVersion,
    /// The vCard being written.
    pub card: &'a VCard,
}

/// An XML element name (xCard).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: String,
    pub local: String,
}

impl QualifiedName {
    /// A name in the vCard 4.0 XML namespace.
    #[must_use]
    pub fn vcard(local: impl Into<String>) -> Self {
        Self {
            namespace: XCARD_NAMESPACE.to_string(),
            local: local.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// Converts one property type to and from text; object safe.
pub trait PropertyScribe: Send + Sync {
    /// The property name on the wire (e.g. `FN`).
    fn property_name(&self) -> &'static str;

    fn kind(&self) -> PropertyKind;

    fn qualified_name(&self) -> QualifiedName {
        QualifiedName::vcard(self.property_name().to_ascii_lowercase())
    }

    /// The data type a value has when no VALUE parameter is given.
    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType>;

    /// The data type `property` is written with.
    fn data_type(
        &self,
        property: &dyn VCardProperty,
        version: VCardVersion,
    ) -> Option<VCardDataType>;

    /// The name `property` is written with.
    fn wire_name(&self, property: &dyn VCardProperty) -> String;

    /// The parameters `property` is written with.
    fn prepare_parameters(
        &self,
        property: &dyn VCardProperty,
        ctx: &WriteContext<'_>,
    ) -> VCardParameters;

    /// Parses a value. `parameters` no longer hold VALUE or a consumed
    /// quoted-printable ENCODING/CHARSET.
    ///
    /// ## Errors
    /// Returns a [`ScribeSignal`] when no property should be stored as is.
    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Box<dyn VCardProperty>>;

    /// Writes a value.
    ///
    /// ## Errors
    /// Returns a [`WriteSignal`] when the value is not plain text.
    fn write_text(&self, property: &dyn VCardProperty, ctx: &WriteContext<'_>) -> WriteResult;
}

/// A scribe for one concrete property type.
pub trait TypedScribe: Send + Sync + 'static {
    type Property: PropertyType;

    fn property_name(&self) -> &'static str;

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType>;

    fn data_type(
        &self,
        _property: &Self::Property,
        version: VCardVersion,
    ) -> Option<VCardDataType> {
        self.default_data_type(version)
    }

    fn wire_name(&self, _property: &Self::Property) -> String {
        self.property_name().to_string()
    }

    /// Adjusts the copy of the property's parameters that will be written.
    fn prepare_parameters(
        &self,
        _property: &Self::Property,
        _parameters: &mut VCardParameters,
        _ctx: &WriteContext<'_>,
    ) {
    }

    /// Parses a value. Parameters left in `parameters` are stored on the
    /// property.
    ///
    /// ## Errors
    /// See [`PropertyScribe::parse_text`].
    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Self::Property>;

    /// ## Errors
    /// See [`PropertyScribe::write_text`].
    fn write_text(&self, property: &Self::Property, ctx: &WriteContext<'_>) -> WriteResult;
}

fn mismatch(scribe: &'static str, property: &dyn VCardProperty) -> String {
    format!("{scribe} scribe cannot write a {} property", property.kind())
}

impl<S: TypedScribe> PropertyScribe for S {
    fn property_name(&self) -> &'static str {
        TypedScribe::property_name(self)
    }

    fn kind(&self) -> PropertyKind {
        S::Property::KIND
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        TypedScribe::default_data_type(self, version)
    }

    fn data_type(
        &self,
        property: &dyn VCardProperty,
        version: VCardVersion,
    ) -> Option<VCardDataType> {
        match property.as_any().downcast_ref::<S::Property>() {
            Some(property) => TypedScribe::data_type(self, property, version),
            None => TypedScribe::default_data_type(self, version),
        }
    }

    fn wire_name(&self, property: &dyn VCardProperty) -> String {
        match property.as_any().downcast_ref::<S::Property>() {
            Some(property) => TypedScribe::wire_name(self, property),
            None => TypedScribe::property_name(self).to_string(),
        }
    }

    fn prepare_parameters(
        &self,
        property: &dyn VCardProperty,
        ctx: &WriteContext<'_>,
    ) -> VCardParameters {
        let mut parameters = property.parameters().clone();
        if let Some(property) = property.as_any().downcast_ref::<S::Property>() {
            TypedScribe::prepare_parameters(self, property, &mut parameters, ctx);
        }
        parameters
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        mut parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> ScribeResult<Box<dyn VCardProperty>> {
        match TypedScribe::parse_text(self, value, data_type, &mut parameters, ctx) {
            Ok(mut property) => {
                property.base_mut().parameters = parameters;
                Ok(Box::new(property))
            }
            Err(ScribeSignal::Embedded(mut embedded)) => {
                *embedded.property.parameters_mut() = parameters;
                Err(ScribeSignal::Embedded(embedded))
            }
            Err(signal) => Err(signal),
        }
    }

    fn write_text(&self, property: &dyn VCardProperty, ctx: &WriteContext<'_>) -> WriteResult {
        match property.as_any().downcast_ref::<S::Property>() {
            Some(property) => TypedScribe::write_text(self, property, ctx),
            None => Err(WriteSignal::Skip(mismatch(
                TypedScribe::property_name(self),
                property,
            ))),
        }
    }
}
