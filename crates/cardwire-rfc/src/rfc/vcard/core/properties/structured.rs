//! Structured properties (N and ADR).
//!
//! Each component holds a list, since every component of both properties
//! may repeat (`N:Doe;John;Paul,Ringo;;`).

use crate::property_common;
use crate::rfc::vcard::core::{HasAltId, PropertyBase, PropertyKind, PropertyType, VCardProperty};

/// Structured name (N property, RFC 6350 §6.2.2).
///
/// All components are optional per RFC 6350.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    pub base: PropertyBase,
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names (first names).
    pub given: Vec<String>,
    /// Additional names (middle names).
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D.").
    pub suffixes: Vec<String>,
}

impl StructuredName {
    /// Creates an empty structured name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns whether the name is empty (all components are empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    /// Formats as a display name (given + family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.join(" "));
        }
        if !self.family.is_empty() {
            parts.push(self.family.join(" "));
        }
        parts.join(" ")
    }

    /// Components in wire order.
    #[must_use]
    pub fn components(&self) -> [&Vec<String>; 5] {
        [
            &self.family,
            &self.given,
            &self.additional,
            &self.prefixes,
            &self.suffixes,
        ]
    }

    /// Builds a name from wire-ordered components; missing trailing
    /// components are empty.
    #[must_use]
    pub fn from_components(components: Vec<Vec<String>>) -> Self {
        let mut it = components.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            base: PropertyBase::default(),
            family: next(),
            given: next(),
            additional: next(),
            prefixes: next(),
            suffixes: next(),
        }
    }
}

impl PropertyType for StructuredName {
    const KIND: PropertyKind = PropertyKind::STRUCTURED_NAME;
}

impl HasAltId for StructuredName {}

impl VCardProperty for StructuredName {
    property_common!();

    fn supports_alt_id(&self) -> bool {
        true
    }
}

/// Address (ADR property, RFC 6350 §6.3.1).
///
/// The delivery label travels in the LABEL parameter (4.0) or as a separate
/// LABEL property (2.1/3.0); either way it is reached through
/// [`Address::label`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub base: PropertyBase,
    /// Post office box.
    pub po_box: Vec<String>,
    /// Extended address (e.g., apartment or suite number).
    pub extended: Vec<String>,
    /// Street address.
    pub street: Vec<String>,
    /// Locality (city).
    pub locality: Vec<String>,
    /// Region (state or province).
    pub region: Vec<String>,
    /// Postal code.
    pub postal_code: Vec<String>,
    /// Country name.
    pub country: Vec<String>,
}

impl Address {
    /// Creates an empty address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the address is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .flat_map(|v| v.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }

    #[must_use]
    pub fn components(&self) -> [&Vec<String>; 7] {
        [
            &self.po_box,
            &self.extended,
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
    }

    #[must_use]
    pub fn from_components(components: Vec<Vec<String>>) -> Self {
        let mut it = components.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            base: PropertyBase::default(),
            po_box: next(),
            extended: next(),
            street: next(),
            locality: next(),
            region: next(),
            postal_code: next(),
            country: next(),
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.base.parameters.label()
    }

    pub fn set_label(&mut self, label: Option<&str>) {
        self.base.parameters.set_label(label);
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        self.base.parameters.types()
    }
}

impl PropertyType for Address {
    const KIND: PropertyKind = PropertyKind::ADDRESS;
}

impl HasAltId for Address {}

impl VCardProperty for Address {
    property_common!();

    fn supports_alt_id(&self) -> bool {
        true
    }
}
