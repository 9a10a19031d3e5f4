//! vCard serialization.
//!
//! The mirror of [`parse`](super::parse): [`VCardWriter`] asks the scribes
//! for each property's value and parameters, [`RawLineWriter`] checks and
//! escapes the content line, and [`FoldedLineWriter`] folds it.

mod error;
mod escape;
mod fold;
mod line_writer;
mod writer;

pub use error::WriteError;
pub use escape::{escape_component, escape_text, join_list, join_structured};
pub use fold::{FoldedLineWriter, FoldingOptions};
pub use line_writer::RawLineWriter;
pub use writer::VCardWriter;
