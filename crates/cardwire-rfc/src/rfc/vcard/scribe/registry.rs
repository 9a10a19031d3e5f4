//! Lookup of scribes by property name, kind and xCard element name.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::{
    AddressScribe, AgentScribe, BirthdayScribe, CategoriesScribe, PhotoScribe, PropertyScribe,
    QualifiedName, RawPropertyScribe, RevisionScribe, StructuredNameScribe, TelephoneScribe,
    TextScribe,
};
use crate::rfc::vcard::core::PropertyKind;
use crate::rfc::vcard::core::properties::{
    Email, FormattedName, Kind, Label, Note, ProductId, Role, Title, Uid,
};

static STANDARD: LazyLock<Arc<ScribeRegistry>> =
    LazyLock::new(|| Arc::new(ScribeRegistry::standard()));

/// The set of scribes a reader or writer works with.
///
/// Names are matched case-insensitively. Names with no registered scribe
/// resolve to the raw scribe, which keeps the property verbatim.
#[derive(Clone)]
pub struct ScribeRegistry {
    by_name: HashMap<String, Arc<dyn PropertyScribe>>,
    by_kind: HashMap<PropertyKind, Arc<dyn PropertyScribe>>,
    by_qname: HashMap<QualifiedName, Arc<dyn PropertyScribe>>,
    raw: Arc<dyn PropertyScribe>,
}

impl std::fmt::Debug for ScribeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ScribeRegistry").field("names", &names).finish_non_exhaustive()
    }
}

impl Default for ScribeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScribeRegistry {
    /// A registry with only the raw scribe.
    #[must_use]
    pub fn empty() -> Self {
        let raw: Arc<dyn PropertyScribe> = Arc::new(RawPropertyScribe);
        let mut by_kind = HashMap::new();
        by_kind.insert(raw.kind(), Arc::clone(&raw));
        Self {
            by_name: HashMap::new(),
            by_kind,
            by_qname: HashMap::new(),
            raw,
        }
    }

    /// A registry with a scribe for every built-in property type.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(TextScribe::<FormattedName>::new("FN")));
        registry.register(Arc::new(TextScribe::<Note>::new("NOTE")));
        registry.register(Arc::new(TextScribe::<Title>::new("TITLE")));
        registry.register(Arc::new(TextScribe::<Role>::new("ROLE")));
        registry.register(Arc::new(TextScribe::<Email>::new("EMAIL")));
        registry.register(Arc::new(TextScribe::<Uid>::new("UID")));
        registry.register(Arc::new(TextScribe::<ProductId>::new("PRODID")));
        registry.register(Arc::new(TextScribe::<Kind>::new("KIND")));
        registry.register(Arc::new(TextScribe::<Label>::new("LABEL")));
        registry.register(Arc::new(StructuredNameScribe));
        registry.register(Arc::new(AddressScribe));
        registry.register(Arc::new(TelephoneScribe));
        registry.register(Arc::new(CategoriesScribe));
        registry.register(Arc::new(PhotoScribe));
        registry.register(Arc::new(BirthdayScribe));
        registry.register(Arc::new(RevisionScribe));
        registry.register(Arc::new(AgentScribe));
        registry
    }

    /// The process-wide standard registry.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Adds a scribe, replacing any scribe registered under the same name,
    /// kind or qualified name.
    pub fn register(&mut self, scribe: Arc<dyn PropertyScribe>) {
        tracing::trace!(name = scribe.property_name(), "Registering scribe");
        self.by_name
            .insert(scribe.property_name().to_ascii_uppercase(), Arc::clone(&scribe));
        self.by_kind.insert(scribe.kind(), Arc::clone(&scribe));
        self.by_qname.insert(scribe.qualified_name(), scribe);
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn PropertyScribe>> {
        self.by_name.get(&name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn by_kind(&self, kind: PropertyKind) -> Option<&Arc<dyn PropertyScribe>> {
        self.by_kind.get(&kind)
    }

    #[must_use]
    pub fn by_qualified_name(&self, name: &QualifiedName) -> Option<&Arc<dyn PropertyScribe>> {
        self.by_qname.get(name)
    }

    /// The scribe for `name`, or the raw scribe.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> &Arc<dyn PropertyScribe> {
        self.by_name(name).unwrap_or(&self.raw)
    }

    /// The scribe for `kind`, or the raw scribe.
    #[must_use]
    pub fn resolve_kind(&self, kind: PropertyKind) -> &Arc<dyn PropertyScribe> {
        self.by_kind(kind).unwrap_or(&self.raw)
    }

    #[must_use]
    pub fn raw(&self) -> &Arc<dyn PropertyScribe> {
        &self.raw
    }
}
