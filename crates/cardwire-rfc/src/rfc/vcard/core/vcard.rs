//! The vCard property store.

use super::altid::{AltIdGroup, group_by_alt_id, next_alt_id};
use super::properties::{
    Address, Agent, Birthday, Categories, Email, FormattedName, Kind, Label, Note, Photo,
    ProductId, RawProperty, Revision, StructuredName, Telephone, Uid,
};
use super::property::{HasAltId, PropertyKind, PropertyType, VCardProperty};
use super::version::VCardVersion;

/// A complete vCard.
///
/// Properties are held in buckets keyed by [`PropertyKind`]. Buckets keep
/// the order in which their kind was first added and each bucket keeps
/// insertion order. The store accepts any number of instances of every
/// kind; single-valued properties are only enforced by the convenience
/// accessors (`formatted_name`, `set_uid`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct VCard {
    version: VCardVersion,
    properties: Vec<(PropertyKind, Vec<Box<dyn VCardProperty>>)>,
}

impl Default for VCard {
    fn default() -> Self {
        Self::new()
    }
}

impl VCard {
    /// Creates an empty vCard 3.0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(VCardVersion::V3_0)
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// The version the vCard was read as (or is meant to be written as).
    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.version
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.version = version;
    }

    /// Total number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.iter().map(|(_, list)| list.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn bucket(&self, kind: PropertyKind) -> Option<&Vec<Box<dyn VCardProperty>>> {
        self.properties
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, list)| list)
    }

    fn bucket_mut(&mut self, kind: PropertyKind) -> Option<&mut Vec<Box<dyn VCardProperty>>> {
        self.properties
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, list)| list)
    }

    /// Appends a property.
    pub fn add<P: PropertyType>(&mut self, property: P) {
        self.add_property(Box::new(property));
    }

    /// Appends a type-erased property.
    pub fn add_property(&mut self, property: Box<dyn VCardProperty>) {
        let kind = property.kind();
        match self.bucket_mut(kind) {
            Some(list) => list.push(property),
            None => self.properties.push((kind, vec![property])),
        }
    }

    /// Returns the first property of a type.
    #[must_use]
    pub fn get_first<P: PropertyType>(&self) -> Option<&P> {
        self.properties_of(P::KIND)
            .iter()
            .find_map(|p| p.as_any().downcast_ref::<P>())
    }

    pub fn get_first_mut<P: PropertyType>(&mut self) -> Option<&mut P> {
        self.bucket_mut(P::KIND)?
            .iter_mut()
            .find_map(|p| p.as_any_mut().downcast_mut::<P>())
    }

    /// Returns all properties of a type, in insertion order.
    #[must_use]
    pub fn get_all<P: PropertyType>(&self) -> Vec<&P> {
        self.properties_of(P::KIND)
            .iter()
            .filter_map(|p| p.as_any().downcast_ref::<P>())
            .collect()
    }

    pub fn get_all_mut<P: PropertyType>(&mut self) -> Vec<&mut P> {
        self.bucket_mut(P::KIND)
            .map(|list| {
                list.iter_mut()
                    .filter_map(|p| p.as_any_mut().downcast_mut::<P>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the properties stored under a kind.
    #[must_use]
    pub fn properties_of(&self, kind: PropertyKind) -> &[Box<dyn VCardProperty>] {
        self.bucket(kind).map_or(&[], Vec::as_slice)
    }

    /// Iterates over every property, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &dyn VCardProperty> {
        self.properties
            .iter()
            .flat_map(|(_, list)| list.iter().map(Box::as_ref))
    }

    /// Kinds present in the store, in first-added order.
    pub fn kinds(&self) -> impl Iterator<Item = PropertyKind> + '_ {
        self.properties.iter().map(|(kind, _)| *kind)
    }

    /// Removes every property of `P`'s type, then adds `property` if given.
    pub fn replace<P: PropertyType>(&mut self, property: Option<P>) {
        self.remove_all(P::KIND);
        if let Some(property) = property {
            self.add(property);
        }
    }

    /// Removes the first property equal to `property`.
    pub fn remove<P: PropertyType>(&mut self, property: &P) -> bool {
        let Some(list) = self.bucket_mut(P::KIND) else {
            return false;
        };
        let found = list
            .iter()
            .position(|p| p.as_any().downcast_ref::<P>() == Some(property));
        let removed = found.map(|i| list.remove(i)).is_some();
        self.prune();
        removed
    }

    /// Removes every property of a kind, returning them.
    pub fn remove_all(&mut self, kind: PropertyKind) -> Vec<Box<dyn VCardProperty>> {
        match self.properties.iter().position(|(k, _)| *k == kind) {
            Some(i) => self.properties.remove(i).1,
            None => Vec::new(),
        }
    }

    /// Drops empty buckets so that equality only sees stored properties.
    fn prune(&mut self) {
        self.properties.retain(|(_, list)| !list.is_empty());
    }

    // --- ALTID ---

    /// Adds a set of alternative representations of one value, giving each
    /// a freshly generated ALTID.
    ///
    /// The ALTID is the smallest positive integer not already used by a
    /// property of the same type in this vCard.
    pub fn add_alternatives<P, I>(&mut self, alternatives: I)
    where
        P: HasAltId,
        I: IntoIterator<Item = P>,
    {
        let alt_id = self.generate_alt_id(P::KIND);
        for mut property in alternatives {
            property.set_alt_id(Some(&alt_id));
            self.add(property);
        }
    }

    /// Returns the smallest positive integer, as a string, that no property
    /// of `kind` uses as its ALTID.
    #[must_use]
    pub fn generate_alt_id(&self, kind: PropertyKind) -> String {
        next_alt_id(self.properties_of(kind))
    }

    /// Groups the properties of a kind by ALTID.
    ///
    /// Groups appear in the order their ALTID was first seen, followed by
    /// one singleton group per property without an ALTID.
    #[must_use]
    pub fn alt_id_groups(&self, kind: PropertyKind) -> Vec<AltIdGroup<'_>> {
        group_by_alt_id(self.properties_of(kind))
    }

    // --- Extended properties ---

    /// All extension and unrecognized properties.
    #[must_use]
    pub fn extended_properties(&self) -> Vec<&RawProperty> {
        self.get_all::<RawProperty>()
    }

    /// The first extension property with the given name.
    #[must_use]
    pub fn extended_property(&self, name: &str) -> Option<&RawProperty> {
        self.get_all::<RawProperty>()
            .into_iter()
            .find(|p| p.is_named(name))
    }

    #[must_use]
    pub fn extended_properties_named(&self, name: &str) -> Vec<&RawProperty> {
        self.get_all::<RawProperty>()
            .into_iter()
            .filter(|p| p.is_named(name))
            .collect()
    }

    /// Adds an extension property.
    pub fn add_extended_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add(RawProperty::new(name, value));
    }

    /// Removes every extension property with the given name.
    pub fn remove_extended_property(&mut self, name: &str) -> Vec<RawProperty> {
        let Some(list) = self.bucket_mut(PropertyKind::RAW) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        list.retain(|p| match p.as_any().downcast_ref::<RawProperty>() {
            Some(raw) if raw.is_named(name) => {
                removed.push(raw.clone());
                false
            }
            _ => true,
        });
        self.prune();
        removed
    }

    // --- Convenience accessors ---

    #[must_use]
    pub fn formatted_name(&self) -> Option<&FormattedName> {
        self.get_first()
    }

    pub fn set_formatted_name(&mut self, name: Option<FormattedName>) {
        self.replace(name);
    }

    #[must_use]
    pub fn structured_name(&self) -> Option<&StructuredName> {
        self.get_first()
    }

    pub fn set_structured_name(&mut self, name: Option<StructuredName>) {
        self.replace(name);
    }

    #[must_use]
    pub fn uid(&self) -> Option<&Uid> {
        self.get_first()
    }

    pub fn set_uid(&mut self, uid: Option<Uid>) {
        self.replace(uid);
    }

    #[must_use]
    pub fn kind(&self) -> Option<&Kind> {
        self.get_first()
    }

    pub fn set_kind(&mut self, kind: Option<Kind>) {
        self.replace(kind);
    }

    #[must_use]
    pub fn product_id(&self) -> Option<&ProductId> {
        self.get_first()
    }

    #[must_use]
    pub fn revision(&self) -> Option<&Revision> {
        self.get_first()
    }

    pub fn set_revision(&mut self, revision: Option<Revision>) {
        self.replace(revision);
    }

    #[must_use]
    pub fn birthday(&self) -> Option<&Birthday> {
        self.get_first()
    }

    pub fn set_birthday(&mut self, birthday: Option<Birthday>) {
        self.replace(birthday);
    }

    #[must_use]
    pub fn agent(&self) -> Option<&Agent> {
        self.get_first()
    }

    pub fn set_agent(&mut self, agent: Option<Agent>) {
        self.replace(agent);
    }

    #[must_use]
    pub fn notes(&self) -> Vec<&Note> {
        self.get_all()
    }

    #[must_use]
    pub fn emails(&self) -> Vec<&Email> {
        self.get_all()
    }

    #[must_use]
    pub fn telephones(&self) -> Vec<&Telephone> {
        self.get_all()
    }

    #[must_use]
    pub fn addresses(&self) -> Vec<&Address> {
        self.get_all()
    }

    #[must_use]
    pub fn photos(&self) -> Vec<&Photo> {
        self.get_all()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&Categories> {
        self.get_all()
    }

    /// Labels that were not attached to an address.
    #[must_use]
    pub fn orphaned_labels(&self) -> Vec<&Label> {
        self.get_all()
    }
}
