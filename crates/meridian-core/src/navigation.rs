//! Traversed navigation tree.
//!
//! A [`TraversedDocument`] is the derived, display-oriented tree built from an
//! [`OpenApiDocument`](crate::OpenApiDocument): tags (real or grouping),
//! operations, webhooks, a models container and free-form text nodes.
//!
//! Only [`TraversedEntry::Tag`] and [`TraversedEntry::Models`] carry children;
//! every other variant is a leaf.
//!
//! The wire shape is internally tagged by `type` with camelCase field names,
//! matching what a rendering layer consumes:
//!
//! ```json
//! {"type": "tag", "id": "tag/users", "name": "users", "title": "Users",
//!  "isGroup": false, "children": []}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{json_type_name, CoreError, CoreResult};
use crate::openapi::HttpMethod;

/// Escape a string for use as one JSON pointer segment (RFC 6901).
///
/// `~` becomes `~0` and `/` becomes `~1`, in that order.
pub fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Root of a navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedDocument {
    /// Stable identifier.
    pub id: String,
    /// Raw OpenAPI identifier.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Top-level entries. Absent in JSON means empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraversedEntry>,
}

impl TraversedDocument {
    /// Parse a tree from a JSON string.
    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(CoreError::InvalidRoot {
                found: json_type_name(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// A tag node: a real OpenAPI tag or an `x-tagGroups` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversedTag {
    /// Stable identifier.
    pub id: String,
    /// Tag key or group name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Tag description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// True when this node represents an `x-tagGroups` group.
    #[serde(default)]
    pub is_group: bool,
    /// Nested entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraversedEntry>,
}

/// An operation leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedOperation {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// JSON pointer to the operation object.
    #[serde(rename = "ref")]
    pub reference: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template.
    pub path: String,
    /// Whether the operation is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// A webhook leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedWebhook {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Webhook name.
    pub name: String,
    /// JSON pointer to the webhook operation.
    #[serde(rename = "ref")]
    pub reference: String,
    /// HTTP method.
    pub method: HttpMethod,
}

/// The models container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedModels {
    /// Stable identifier.
    pub id: String,
    /// Raw identifier.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Schema entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraversedEntry>,
}

/// A schema leaf inside the models container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedSchema {
    /// Stable identifier.
    pub id: String,
    /// Schema name as declared under `components.schemas`.
    pub name: String,
    /// Display title.
    pub title: String,
    /// JSON pointer to the schema.
    #[serde(rename = "ref")]
    pub reference: String,
}

/// A free-form documentation node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversedText {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
}

/// Any node below the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraversedEntry {
    /// Tag or tag group.
    Tag(TraversedTag),
    /// Operation leaf.
    Operation(TraversedOperation),
    /// Webhook leaf.
    Webhook(TraversedWebhook),
    /// Models container.
    Models(TraversedModels),
    /// Schema leaf.
    Schema(TraversedSchema),
    /// Text leaf.
    Text(TraversedText),
}

impl TraversedEntry {
    /// Stable identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Tag(tag) => &tag.id,
            Self::Operation(op) => &op.id,
            Self::Webhook(hook) => &hook.id,
            Self::Models(models) => &models.id,
            Self::Schema(schema) => &schema.id,
            Self::Text(text) => &text.id,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        match self {
            Self::Tag(tag) => &tag.title,
            Self::Operation(op) => &op.title,
            Self::Webhook(hook) => &hook.title,
            Self::Models(models) => &models.title,
            Self::Schema(schema) => &schema.title,
            Self::Text(text) => &text.title,
        }
    }

    /// Raw name, for variants that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Tag(tag) => Some(&tag.name),
            Self::Webhook(hook) => Some(&hook.name),
            Self::Models(models) => Some(&models.name),
            Self::Schema(schema) => Some(&schema.name),
            Self::Operation(_) | Self::Text(_) => None,
        }
    }

    /// HTTP method, for operations and webhooks.
    pub fn method(&self) -> Option<HttpMethod> {
        match self {
            Self::Operation(op) => Some(op.method),
            Self::Webhook(hook) => Some(hook.method),
            _ => None,
        }
    }

    /// Path template, for operations.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Operation(op) => Some(&op.path),
            _ => None,
        }
    }

    /// Child entries. Leaves return an empty slice.
    pub fn children(&self) -> &[TraversedEntry] {
        match self {
            Self::Tag(tag) => &tag.children,
            Self::Models(models) => &models.children,
            _ => &[],
        }
    }

    /// The tag payload, if this entry is a tag.
    pub fn as_tag(&self) -> Option<&TraversedTag> {
        match self {
            Self::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// The variant name as it appears in the `type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tag(_) => "tag",
            Self::Operation(_) => "operation",
            Self::Webhook(_) => "webhook",
            Self::Models(_) => "models",
            Self::Schema(_) => "schema",
            Self::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_without_children() {
        let doc = TraversedDocument::from_json_str(r#"{"id": "doc", "title": "API"}"#).unwrap();
        assert!(doc.children.is_empty());
        assert_eq!(doc.name, "");
    }

    #[test]
    fn test_document_rejects_non_object() {
        let err = TraversedDocument::from_json_str("\"doc\"").unwrap_err();
        assert!(matches!(err, CoreError::InvalidRoot { found: "string" }));
    }

    #[test]
    fn test_entry_tagged_by_type() {
        let entry: TraversedEntry = serde_json::from_value(json!({
            "type": "tag",
            "id": "tag/users",
            "name": "users",
            "title": "Users",
            "isGroup": true,
            "children": [
                {"type": "operation", "id": "op", "title": "List", "ref": "#/paths/~1users/get",
                 "method": "get", "path": "/users"}
            ]
        }))
        .unwrap();

        assert_eq!(entry.kind(), "tag");
        assert!(entry.as_tag().unwrap().is_group);
        assert_eq!(entry.children().len(), 1);
        let op = &entry.children()[0];
        assert_eq!(op.method(), Some(HttpMethod::Get));
        assert_eq!(op.path(), Some("/users"));
        assert!(op.children().is_empty());
        assert!(op.name().is_none());
    }

    #[test]
    fn test_entry_serializes_ref_and_camel_case() {
        let entry = TraversedEntry::Tag(TraversedTag {
            id: "t".to_string(),
            name: "pets".to_string(),
            title: "Pets".to_string(),
            is_group: false,
            ..Default::default()
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "tag");
        assert_eq!(value["isGroup"], false);
        assert!(value.get("children").is_none());

        let schema = TraversedEntry::Schema(TraversedSchema {
            id: "s".to_string(),
            name: "Pet".to_string(),
            title: "Pet".to_string(),
            reference: "#/components/schemas/Pet".to_string(),
        });
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["ref"], "#/components/schemas/Pet");
    }

    #[test]
    fn test_escape_pointer_segment() {
        assert_eq!(escape_pointer_segment("/pets/{id}"), "~1pets~1{id}");
        assert_eq!(escape_pointer_segment("/a~b"), "~1a~0b");
    }

    #[test]
    fn test_text_is_leaf() {
        let entry: TraversedEntry =
            serde_json::from_value(json!({"type": "text", "id": "intro", "title": "Introduction"}))
                .unwrap();
        assert_eq!(entry.title(), "Introduction");
        assert!(entry.children().is_empty());
        assert!(entry.method().is_none());
    }
}
