//! OpenAPI document types.
//!
//! These types cover the parts of an OpenAPI 3.x document that navigation and
//! context resolution read: tags and tag groups, paths and webhooks, schemas,
//! security declarations and servers. Everything else in a document is
//! ignored on deserialization.
//!
//! Documents are expected to be structurally valid and fully dereferenced
//! before they reach this crate.
//!
//! ## Vendor extensions
//!
//! | Extension | Where | Meaning |
//! |---|---|---|
//! | `x-tagGroups` | document | Clusters tags under a display-only parent |
//! | `x-displayName` | tag | Display title for a tag |
//! | `x-internal` | tag, operation | Hidden from navigation |
//! | `x-scalar-ignore` | tag, operation | Hidden from navigation |
//! | `x-scalar-selected-security` | document, operation | Current auth selection |
//! | `x-scalar-set-operation-security` | document | Surface auth on operations without a selection |

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{json_type_name, CoreError, CoreResult};

/// Title used for tags that have neither a display name nor a name.
pub const UNTITLED_TAG: &str = "Untitled Tag";

/// Name of the synthetic tag that collects untagged operations.
pub const DEFAULT_TAG: &str = "default";

/// OpenAPI document root object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version string.
    #[serde(default)]
    pub openapi: String,
    /// API metadata.
    #[serde(default)]
    pub info: Info,
    /// Declared servers. `None` when the document has no `servers` key or
    /// it is not an array. Entries that are not valid server objects are
    /// dropped on load.
    #[serde(
        default,
        deserialize_with = "deserialize_servers",
        skip_serializing_if = "Option::is_none"
    )]
    pub servers: Option<Vec<Server>>,
    /// API paths and their operations, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Webhooks, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub webhooks: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
    /// Tag metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Document-level security alternatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Tag groups (`x-tagGroups`).
    #[serde(default, rename = "x-tagGroups", skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<TagGroup>,
    /// Document-level security selection (`x-scalar-selected-security`).
    #[serde(
        default,
        rename = "x-scalar-selected-security",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_security: Option<SelectedSecurity>,
    /// Whether operations should surface their first requirement when nothing
    /// is selected (`x-scalar-set-operation-security`).
    #[serde(
        default,
        rename = "x-scalar-set-operation-security",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub set_operation_security: bool,
}

impl OpenApiDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json_value(value)
    }

    /// Parse a document from an already-decoded JSON value.
    ///
    /// The root must be an object.
    pub fn from_json_value(value: serde_json::Value) -> CoreResult<Self> {
        if !value.is_object() {
            return Err(CoreError::InvalidRoot {
                found: json_type_name(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Look up a tag declared in the document's `tags` list.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Look up an operation by path and method.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version.
    #[serde(default)]
    pub version: String,
    /// API description (Markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// HTTP verbs an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// All methods in the order a path item declares them.
    pub const ALL: [HttpMethod; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Lowercase verb string, as written in OpenAPI documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path item containing operations for a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Summary for all operations on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// The operation bound to `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Declared operations in canonical verb order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

/// An API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Operation security. `Some(vec![])` explicitly removes security.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Hidden from navigation (`x-internal`).
    #[serde(default, rename = "x-internal", skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
    /// Hidden from navigation (`x-scalar-ignore`).
    #[serde(
        default,
        rename = "x-scalar-ignore",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub ignored: bool,
    /// Operation-level security selection.
    #[serde(
        default,
        rename = "x-scalar-selected-security",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_security: Option<SelectedSecurity>,
}

impl Operation {
    /// Whether the operation should be left out of navigation.
    pub fn is_hidden(&self) -> bool {
        self.internal || self.ignored
    }
}

/// API tag for grouping operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name (the key operations refer to).
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display title (`x-displayName`).
    #[serde(
        default,
        rename = "x-displayName",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    /// Hidden from navigation (`x-internal`).
    #[serde(default, rename = "x-internal", skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
    /// Hidden from navigation (`x-scalar-ignore`).
    #[serde(
        default,
        rename = "x-scalar-ignore",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub ignored: bool,
    /// External documentation.
    #[serde(default, rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
}

impl Tag {
    /// A placeholder tag carrying only a name.
    ///
    /// Used wherever a tag key is referenced but not declared.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the tag (and everything under it) is hidden from navigation.
    pub fn is_hidden(&self) -> bool {
        self.internal || self.ignored
    }

    /// The title shown for this tag: display name, then name, then a placeholder.
    pub fn title(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display) => display,
            None if !self.name.is_empty() => &self.name,
            None => UNTITLED_TAG,
        }
    }
}

/// A tag group (`x-tagGroups` entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    /// Group title.
    pub name: String,
    /// Member tag keys, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// External documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    /// URL.
    pub url: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL. May be relative (leading `/`) or templated.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server variables for URL templating.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// Create a server with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Whether the URL is relative to some origin.
    pub fn is_relative(&self) -> bool {
        self.url.starts_with('/')
    }
}

/// Server variable for URL templating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Default value.
    pub default: String,
    /// Possible values.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas, kept as raw JSON.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, serde_json::Value>,
    /// Security schemes.
    #[serde(
        default,
        rename = "securitySchemes",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

impl Components {
    /// Whether no components are declared.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.security_schemes.is_empty()
    }
}

/// Security scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Security scheme type (`apiKey`, `http`, `oauth2`, `openIdConnect`, ...).
    #[serde(default, rename = "type")]
    pub scheme_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP auth scheme name (for type=http).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format.
    #[serde(default, rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    /// API key location (for type=apiKey).
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// API key name (for type=apiKey).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// OAuth2 flows, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<serde_json::Value>,
    /// OpenID Connect discovery URL.
    #[serde(
        default,
        rename = "openIdConnectUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_id_connect_url: Option<String>,
}

/// Security requirement: scheme name to required scopes, all schemes ANDed.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// The current security selection (`x-scalar-selected-security`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSecurity {
    /// Index into `selected_schemes` checked first. Negative means unset.
    #[serde(default = "default_selected_index", rename = "selectedIndex")]
    pub selected_index: i64,
    /// Selected requirements, in priority order.
    #[serde(default, rename = "selectedSchemes")]
    pub selected_schemes: Vec<SecurityRequirement>,
}

impl Default for SelectedSecurity {
    fn default() -> Self {
        Self {
            selected_index: default_selected_index(),
            selected_schemes: Vec::new(),
        }
    }
}

impl SelectedSecurity {
    /// Create a selection pointing at `index`.
    pub fn new(selected_index: i64, selected_schemes: Vec<SecurityRequirement>) -> Self {
        Self {
            selected_index,
            selected_schemes,
        }
    }

    /// The requirement `selected_index` points at, if the index is in range.
    pub fn at_selected_index(&self) -> Option<&SecurityRequirement> {
        usize::try_from(self.selected_index)
            .ok()
            .and_then(|index| self.selected_schemes.get(index))
    }
}

fn default_selected_index() -> i64 {
    -1
}

fn deserialize_servers<'de, D>(deserializer: D) -> Result<Option<Vec<Server>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        if !value.is_null() {
            warn!(found = json_type_name(&value), "Ignoring non-array servers");
        }
        return Ok(None);
    };

    let servers = entries
        .into_iter()
        .filter_map(|entry| match Server::deserialize(&entry) {
            Ok(server) => Some(server),
            Err(error) => {
                warn!(%error, server = %entry, "Dropping invalid server");
                None
            }
        })
        .collect();
    Ok(Some(servers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_document() {
        let doc = OpenApiDocument::from_json_str(
            r#"{"openapi": "3.1.0", "info": {"title": "Test", "version": "1.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(doc.info.title, "Test");
        assert!(doc.servers.is_none());
        assert!(doc.paths.is_empty());
        assert!(doc.components.is_empty());
    }

    #[test]
    fn test_invalid_servers_dropped() {
        let doc = OpenApiDocument::from_json_value(json!({
            "openapi": "3.1.0",
            "info": {"title": "T", "version": "1"},
            "servers": [{"description": "no url"}, "not a server", {"url": "/v1"}]
        }))
        .unwrap();
        let servers = doc.servers.unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "/v1");

        let doc = OpenApiDocument::from_json_value(json!({
            "servers": [{"description": "no url"}]
        }))
        .unwrap();
        assert_eq!(doc.servers, Some(Vec::new()));
    }

    #[test]
    fn test_non_array_servers_ignored() {
        let doc = OpenApiDocument::from_json_value(json!({"servers": "https://api.example.com"}))
            .unwrap();
        assert!(doc.servers.is_none());

        let doc = OpenApiDocument::from_json_value(json!({"servers": null})).unwrap();
        assert!(doc.servers.is_none());
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = OpenApiDocument::from_json_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRoot { found: "array" }));
    }

    #[test]
    fn test_vendor_extensions_deserialize() {
        let doc = OpenApiDocument::from_json_value(json!({
            "openapi": "3.1.0",
            "info": {"title": "T", "version": "1"},
            "tags": [
                {"name": "users", "x-displayName": "Users", "x-internal": true},
                {"name": "pets", "x-scalar-ignore": true}
            ],
            "x-tagGroups": [{"name": "Core", "tags": ["users", "pets"]}],
            "x-scalar-selected-security": {"selectedIndex": 0, "selectedSchemes": [{"apiKey": []}]},
            "x-scalar-set-operation-security": true
        }))
        .unwrap();

        let users = doc.tag("users").unwrap();
        assert_eq!(users.display_name.as_deref(), Some("Users"));
        assert!(users.is_hidden());
        assert!(doc.tag("pets").unwrap().is_hidden());
        assert_eq!(doc.tag_groups[0].tags, vec!["users", "pets"]);
        assert!(doc.set_operation_security);
        let selected = doc.selected_security.unwrap();
        assert_eq!(selected.at_selected_index().unwrap().keys().next().unwrap(), "apiKey");
    }

    #[test]
    fn test_path_item_operations_in_canonical_order() {
        let item: PathItem = serde_json::from_value(json!({
            "post": {"summary": "Create"},
            "get": {"summary": "List"},
            "delete": {"summary": "Remove"}
        }))
        .unwrap();
        let methods: Vec<_> = item.operations().map(|(method, _)| method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]);
    }

    #[test]
    fn test_operation_security_absent_vs_empty() {
        let inherits: Operation = serde_json::from_value(json!({})).unwrap();
        let overrides: Operation = serde_json::from_value(json!({"security": []})).unwrap();
        assert!(inherits.security.is_none());
        assert_eq!(overrides.security, Some(vec![]));
    }

    #[test]
    fn test_tag_title_fallbacks() {
        assert_eq!(Tag::named("users").title(), "users");
        let display = Tag {
            display_name: Some("People".to_string()),
            ..Tag::named("users")
        };
        assert_eq!(display.title(), "People");
        assert_eq!(Tag::default().title(), UNTITLED_TAG);
    }

    #[test]
    fn test_selected_index_out_of_range() {
        let mut requirement = SecurityRequirement::new();
        requirement.insert("apiKey".to_string(), vec![]);
        let selected = SelectedSecurity::new(3, vec![requirement.clone()]);
        assert!(selected.at_selected_index().is_none());
        let unset = SelectedSecurity::new(-1, vec![requirement]);
        assert!(unset.at_selected_index().is_none());
        assert_eq!(SelectedSecurity::default().selected_index, -1);
    }

    #[test]
    fn test_server_variables_keep_order() {
        let server: Server = serde_json::from_value(json!({
            "url": "https://{region}.example.com:{port}",
            "variables": {
                "region": {"default": "eu", "enum": ["eu", "us"]},
                "port": {"default": "443"}
            }
        }))
        .unwrap();
        let names: Vec<_> = server.variables.keys().collect();
        assert_eq!(names, vec!["region", "port"]);
        assert_eq!(server.variables["region"].enum_values, vec!["eu", "us"]);
        assert!(!server.is_relative());
        assert!(Server::new("/api").is_relative());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        let method: HttpMethod = serde_json::from_value(json!("trace")).unwrap();
        assert_eq!(method, HttpMethod::Trace);
    }
}
