//! vCard 2.1 / 3.0 / 4.0 text codec.
//!
//! See [`rfc::vcard`] for the data model, reader and writer.

pub mod error;
pub mod rfc;

pub use error::{RfcError, RfcResult};
