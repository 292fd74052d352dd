// Core database operations
pub mod core;
pub mod pagination;

mod asset_operations;
mod content_type_operations;
mod document_operations;
mod slice_operations;

#[cfg(test)]
mod tests;

pub use core::DbOperations;
pub use document_operations::DocumentFilter;
pub use pagination::{Page, PageMeta, Pagination};
