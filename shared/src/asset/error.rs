use thiserror::Error;

use crate::SchemaError;

/// Errors that can occur while loading an attribute set from a data asset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    /// The asset could not be read from disk
    #[error("Failed to read attribute set asset '{path}': {reason}")]
    Io { path: String, reason: String },

    /// The asset is not valid JSON
    #[error("Attribute set asset is not valid JSON: {0}")]
    Json(String),

    /// The asset root, or an attribute entry, is not a JSON object
    #[error("Expected a JSON object for {context}")]
    NotAnObject { context: String },

    /// The asset has no attributes array
    #[error("Attribute set '{set}' has no attributes array")]
    MissingAttributes { set: String },

    /// The attributes array is present but empty
    #[error("Attribute set '{set}' must define at least one attribute")]
    EmptyAttributes { set: String },

    /// An attribute entry has no usable name
    #[error("Attribute entry {index} of '{set}' is missing a name")]
    MissingName { set: String, index: usize },

    /// A metadata value could not be coerced to the expected type
    #[error("Attribute '{attribute}' has invalid {key} value {value}, expected {expected}")]
    InvalidMetadata {
        attribute: String,
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The parsed definitions do not form a valid schema
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<serde_json::Error> for AssetError {
    fn from(error: serde_json::Error) -> Self {
        AssetError::Json(error.to_string())
    }
}
