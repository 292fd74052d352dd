pub mod definitions;
pub mod errors;
pub mod field_descriptor;
pub mod schema;

pub use definitions::{ContentType, SliceDefinition};
pub use errors::SchemaError;
pub use field_descriptor::{
    ContentTypeField, ContentTypeFieldType, FieldDescriptor, FieldKind, SliceField,
    SliceFieldType,
};
pub use schema::{ContentTypeSchema, SchemaContext, SliceSchema, ValidatedSchema};
