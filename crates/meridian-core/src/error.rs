//! Error types for the document model crate.
//!
//! The resolution components never fail; the only fallible step this crate
//! exposes is turning raw JSON into an [`OpenApiDocument`](crate::OpenApiDocument)
//! or a [`TraversedDocument`](crate::TraversedDocument).

use thiserror::Error;

/// Errors that can occur while loading documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Failed to deserialize a document from JSON.
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document root was not a JSON object.
    #[error("Document root must be an object, found {found}")]
    InvalidRoot {
        /// The JSON type that was found instead.
        found: &'static str,
    },
}

/// Result type for document loading.
pub type CoreResult<T> = Result<T, CoreError>;

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err: CoreError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::Parse(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_invalid_root_error() {
        let err = CoreError::InvalidRoot { found: "array" };
        assert_eq!(err.to_string(), "Document root must be an object, found array");
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&serde_json::json!([])), "array");
        assert_eq!(json_type_name(&serde_json::json!(null)), "null");
        assert_eq!(json_type_name(&serde_json::json!({})), "object");
    }
}
