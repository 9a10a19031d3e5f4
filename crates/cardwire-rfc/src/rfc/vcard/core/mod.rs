//! vCard data model.

mod altid;
mod data_type;
mod encoding;
pub mod parameter;
pub mod properties;
pub mod property;
mod validation;
mod vcard;
mod version;

pub use altid::AltIdGroup;
pub use data_type::VCardDataType;
pub use encoding::Encoding;
pub use parameter::{VCardParameter, VCardParameters};
pub use property::{
    HasAltId, PropertyBase, PropertyKind, PropertyType, TextValued, VCardProperty,
};
pub use validation::{ValidationGroup, ValidationTarget, ValidationWarnings};
pub use vcard::VCard;
pub use version::VCardVersion;
