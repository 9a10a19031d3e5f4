//! vCard property model.
//!
//! Every property type implements [`VCardProperty`], the object-safe trait
//! stored inside a [`VCard`](super::VCard). Types also implement
//! [`PropertyType`], which ties the Rust type to its [`PropertyKind`] so the
//! store can be queried by type.

use std::any::Any;
use std::fmt;

use super::parameter::VCardParameters;
use super::version::VCardVersion;

/// Stable identity of a property type, used as the store key.
///
/// Every extension (unrecognized) property shares [`PropertyKind::RAW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKind(&'static str);

impl PropertyKind {
    pub const AGENT: Self = Self("AGENT");
    pub const ADDRESS: Self = Self("ADR");
    pub const BIRTHDAY: Self = Self("BDAY");
    pub const CATEGORIES: Self = Self("CATEGORIES");
    pub const EMAIL: Self = Self("EMAIL");
    pub const FORMATTED_NAME: Self = Self("FN");
    pub const KIND: Self = Self("KIND");
    pub const LABEL: Self = Self("LABEL");
    pub const NOTE: Self = Self("NOTE");
    pub const PHOTO: Self = Self("PHOTO");
    pub const PRODUCT_ID: Self = Self("PRODID");
    pub const REVISION: Self = Self("REV");
    pub const ROLE: Self = Self("ROLE");
    pub const STRUCTURED_NAME: Self = Self("N");
    pub const TELEPHONE: Self = Self("TEL");
    pub const TITLE: Self = Self("TITLE");
    pub const UID: Self = Self("UID");
    /// Extension and unrecognized properties.
    pub const RAW: Self = Self("*");

    /// Creates a kind for a property type defined outside this crate.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Versions accepted by properties that exist in every version.
pub const ALL_VERSIONS: &[VCardVersion] = &VCardVersion::ALL;
/// Versions accepted by properties introduced in 3.0.
pub const SINCE_3_0: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];
/// Versions accepted by properties removed in 4.0.
pub const UNTIL_3_0: &[VCardVersion] = &[VCardVersion::V2_1, VCardVersion::V3_0];
pub const ONLY_4_0: &[VCardVersion] = &[VCardVersion::V4_0];

/// Fields every property carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBase {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    pub parameters: VCardParameters,
}

/// A property stored in a vCard.
pub trait VCardProperty: fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> PropertyKind;

    fn base(&self) -> &PropertyBase;

    fn base_mut(&mut self) -> &mut PropertyBase;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn clone_box(&self) -> Box<dyn VCardProperty>;

    /// Value equality across trait objects; properties of different types
    /// are never equal.
    fn eq_dyn(&self, other: &dyn VCardProperty) -> bool;

    /// The versions this property may appear in.
    fn supported_versions(&self) -> &'static [VCardVersion] {
        ALL_VERSIONS
    }

    /// Whether the property may carry an ALTID parameter.
    fn supports_alt_id(&self) -> bool {
        false
    }

    /// Type-specific checks, appended to `warnings`.
    fn validate_value(&self, _version: VCardVersion, _warnings: &mut Vec<String>) {}

    fn group(&self) -> Option<&str> {
        self.base().group.as_deref()
    }

    fn set_group(&mut self, group: Option<String>) {
        self.base_mut().group = group;
    }

    fn parameters(&self) -> &VCardParameters {
        &self.base().parameters
    }

    fn parameters_mut(&mut self) -> &mut VCardParameters {
        &mut self.base_mut().parameters
    }

    fn alt_id(&self) -> Option<&str> {
        self.parameters().alt_id()
    }

    fn set_alt_id(&mut self, alt_id: Option<&str>) {
        self.parameters_mut().set_alt_id(alt_id);
    }

    fn is_supported_by(&self, version: VCardVersion) -> bool {
        self.supported_versions().contains(&version)
    }
}

impl Clone for Box<dyn VCardProperty> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn VCardProperty {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

/// A concrete property type with a fixed kind.
pub trait PropertyType: VCardProperty + Clone + PartialEq {
    const KIND: PropertyKind;
}

/// Marker for property types that support alternative representations.
pub trait HasAltId: PropertyType {}

/// Property types whose value is a single string.
pub trait TextValued: PropertyType {
    fn from_text(value: String) -> Self;

    fn text(&self) -> &str;
}

/// Implements the [`VCardProperty`] plumbing for a struct with a
/// `base: PropertyBase` field. Use inside the `impl VCardProperty` block.
#[macro_export]
macro_rules! property_common {
    () => {
        fn kind(&self) -> $crate::rfc::vcard::core::PropertyKind {
            <Self as $crate::rfc::vcard::core::PropertyType>::KIND
        }

        fn base(&self) -> &$crate::rfc::vcard::core::PropertyBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::rfc::vcard::core::PropertyBase {
            &mut self.base
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }

        fn clone_box(&self) -> Box<dyn $crate::rfc::vcard::core::VCardProperty> {
            Box::new(self.clone())
        }

        fn eq_dyn(&self, other: &dyn $crate::rfc::vcard::core::VCardProperty) -> bool {
            other
                .as_any()
                .downcast_ref::<Self>()
                .is_some_and(|other| other == self)
        }
    };
}

/// Declares a property type whose value is a single text string.
#[macro_export]
macro_rules! text_property {
    ($(#[$meta:meta])* $ty:ident, $kind:ident, versions: $versions:expr, alt_id: true) => {
        $crate::text_property!(@define $(#[$meta])* $ty, $kind, $versions, true);
        impl $crate::rfc::vcard::core::HasAltId for $ty {}
    };
    ($(#[$meta:meta])* $ty:ident, $kind:ident, versions: $versions:expr, alt_id: false) => {
        $crate::text_property!(@define $(#[$meta])* $ty, $kind, $versions, false);
    };
    (@define $(#[$meta:meta])* $ty:ident, $kind:ident, $versions:expr, $alt_id:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $ty {
            pub base: $crate::rfc::vcard::core::PropertyBase,
            pub value: String,
        }

        impl $ty {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    base: $crate::rfc::vcard::core::PropertyBase::default(),
                    value: value.into(),
                }
            }
        }

        impl $crate::rfc::vcard::core::PropertyType for $ty {
            const KIND: $crate::rfc::vcard::core::PropertyKind =
                $crate::rfc::vcard::core::PropertyKind::$kind;
        }

        impl $crate::rfc::vcard::core::TextValued for $ty {
            fn from_text(value: String) -> Self {
                Self::new(value)
            }

            fn text(&self) -> &str {
                &self.value
            }
        }

        impl $crate::rfc::vcard::core::VCardProperty for $ty {
            $crate::property_common!();

            fn supported_versions(&self) -> &'static [$crate::rfc::vcard::core::VCardVersion] {
                $versions
            }

            fn supports_alt_id(&self) -> bool {
                $alt_id
            }
        }
    };
}
