//! Documents and the slice instances they are composed of.

pub mod composer;
pub mod slice_data;
pub mod types;

pub use composer::validate_document_data;
pub use slice_data::{is_truthy, slice_data_satisfies};
pub use types::{Document, DocumentData, DocumentStatus, SliceInstance};
