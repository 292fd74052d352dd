//! Schema model and structural validation for content types and slices.

pub mod types;
pub mod validator;

pub use types::{
    ContentType, ContentTypeField, ContentTypeFieldType, ContentTypeSchema, FieldDescriptor,
    FieldKind, SchemaContext, SchemaError, SliceDefinition, SliceField, SliceFieldType,
    SliceSchema, ValidatedSchema,
};
pub use validator::SchemaValidator;
