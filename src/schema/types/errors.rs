use std::fmt;

/// Structural failures raised while checking schemas and document payloads.
///
/// Every message carries the path of the offending value (for example
/// `primary[1].type`) so callers can surface it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The top-level value is not an object or lacks a required key.
    InvalidShape(String),
    /// A field descriptor is missing a member or carries a value of the wrong kind.
    InvalidField(String),
    /// A field descriptor names a type outside the closed set for its context.
    UnknownFieldType(String),
    /// A document payload does not have the expected structure.
    InvalidData(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchemaError::InvalidShape(msg) => write!(f, "Invalid schema: {}", msg),
            SchemaError::InvalidField(msg) => write!(f, "Invalid field: {}", msg),
            SchemaError::UnknownFieldType(msg) => write!(f, "Unknown field type: {}", msg),
            SchemaError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}
