//! The property types this crate knows how to read and write.

mod agent;
mod categories;
mod date;
mod photo;
mod raw;
mod structured;
mod telephone;
mod text;

pub use agent::Agent;
pub use categories::Categories;
pub use date::{Birthday, BirthdayValue, Revision};
pub use photo::{Photo, PhotoSource};
pub use raw::RawProperty;
pub use structured::{Address, StructuredName};
pub use telephone::{Telephone, TelephoneValue};
pub use text::{Email, FormattedName, Kind, Label, Note, ProductId, Role, Title, Uid};
