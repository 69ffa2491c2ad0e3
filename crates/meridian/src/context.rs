//! Configured entry point for reference rendering.

use std::fmt;
use std::sync::Arc;

use meridian_config::MeridianConfig;
use meridian_core::{OpenApiDocument, Operation, Server, TraversedDocument};
use meridian_navigation::{
    get_tag_entries, traverse_document, NavigationIndex, OperationsSorter, SidebarOptions,
    TagEntries, TagsSorter, TraverseOptions,
};
use meridian_security::{filter_selected_security, ActiveScheme};
use meridian_servers::{
    resolve_servers, NoOrigin, OriginProvider, ServerResolveOptions, StaticOrigin,
};
use tracing::{debug, warn};

/// Navigation, security and server resolution bound to one set of options.
///
/// Build it once per host (from [`MeridianConfig`] or by hand) and share it;
/// every method takes the document it works on.
///
/// # Example
///
/// ```
/// use meridian::ReferenceContext;
/// use meridian_core::fixtures::petstore_document;
///
/// let context = ReferenceContext::new();
/// let document = petstore_document();
///
/// let tree = context.traverse(&document);
/// assert!(context.tag_entries(&tree).contains_key("pets"));
///
/// let servers = context.servers(&document, Some("https://petstore.example.com/openapi.json"));
/// assert_eq!(servers[0].url, "https://petstore.example.com/api/v1");
/// ```
#[derive(Clone)]
pub struct ReferenceContext {
    traverse: TraverseOptions,
    base_server_url: Option<String>,
    origin: Arc<dyn OriginProvider>,
}

impl Default for ReferenceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReferenceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceContext")
            .field("traverse", &self.traverse)
            .field("base_server_url", &self.base_server_url)
            .field("origin", &self.origin.origin())
            .finish()
    }
}

impl ReferenceContext {
    /// Default options and no ambient origin.
    pub fn new() -> Self {
        Self {
            traverse: TraverseOptions::default(),
            base_server_url: None,
            origin: Arc::new(NoOrigin),
        }
    }

    /// Options taken from a loaded configuration.
    ///
    /// Unknown sorter names fall back to document order.
    pub fn from_config(config: &MeridianConfig) -> Self {
        let navigation = &config.navigation;

        let tags_sorter = TagsSorter::from_name(&navigation.tags_sorter).unwrap_or_else(|| {
            warn!(sorter = %navigation.tags_sorter, "Unknown tags sorter, keeping document order");
            TagsSorter::Unsorted
        });
        let operations_sorter = OperationsSorter::from_name(&navigation.operations_sorter)
            .unwrap_or_else(|| {
                warn!(
                    sorter = %navigation.operations_sorter,
                    "Unknown operations sorter, keeping document order"
                );
                OperationsSorter::Unsorted
            });

        let traverse = TraverseOptions {
            document_id: navigation.document_id.clone(),
            sidebar: SidebarOptions::default()
                .with_tags_sorter(tags_sorter)
                .with_operations_sorter(operations_sorter),
            hide_models: navigation.hide_models,
            ..TraverseOptions::default()
        };

        let origin: Arc<dyn OriginProvider> = match config
            .servers
            .default_origin
            .as_deref()
            .and_then(StaticOrigin::from_url)
        {
            Some(origin) => Arc::new(origin),
            None => Arc::new(NoOrigin),
        };

        debug!(document_id = %traverse.document_id, "Reference context configured");

        Self {
            traverse,
            base_server_url: config.servers.base_server_url.clone(),
            origin,
        }
    }

    /// Replace the traversal options.
    pub fn with_traverse_options(mut self, options: TraverseOptions) -> Self {
        self.traverse = options;
        self
    }

    /// Replace the ambient origin provider.
    pub fn with_origin(mut self, origin: impl OriginProvider + 'static) -> Self {
        self.origin = Arc::new(origin);
        self
    }

    /// Set the base URL relative servers are joined onto.
    pub fn with_base_server_url(mut self, url: impl Into<String>) -> Self {
        self.base_server_url = Some(url.into());
        self
    }

    /// The traversal options in use.
    pub fn traverse_options(&self) -> &TraverseOptions {
        &self.traverse
    }

    /// Build the navigation tree for `document`.
    pub fn traverse(&self, document: &OpenApiDocument) -> TraversedDocument {
        traverse_document(document, &self.traverse)
    }

    /// Tag occurrences of a built tree, keyed by tag name.
    pub fn tag_entries<'a>(&self, tree: &'a TraversedDocument) -> TagEntries<'a> {
        get_tag_entries(tree)
    }

    /// Parent-aware index over a built tree.
    pub fn index<'a>(&self, tree: &'a TraversedDocument) -> NavigationIndex<'a> {
        NavigationIndex::new(tree)
    }

    /// Security schemes to pre-select for `operation`, or for the document
    /// as a whole when `operation` is `None`.
    pub fn active_security<'a>(
        &self,
        document: &'a OpenApiDocument,
        operation: Option<&'a Operation>,
    ) -> Vec<ActiveScheme<'a>> {
        filter_selected_security(document, operation)
    }

    /// Effective servers for `document`, loaded from `document_url` if known.
    pub fn servers(&self, document: &OpenApiDocument, document_url: Option<&str>) -> Vec<Server> {
        let options = ServerResolveOptions {
            base_server_url: self.base_server_url.clone(),
            document_url: document_url.map(str::to_string),
        };
        resolve_servers(document.servers.as_deref(), &options, self.origin.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_config::{NavigationConfig, ServersConfig};
    use meridian_core::fixtures::petstore_document;
    use meridian_core::HttpMethod;

    #[test]
    fn test_new_uses_defaults() {
        let context = ReferenceContext::new();
        assert_eq!(context.traverse_options().document_id, "document");
        assert!(context.base_server_url.is_none());
        assert!(context.origin.origin().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = MeridianConfig::builder()
            .navigation(NavigationConfig {
                document_id: "petstore".to_string(),
                tags_sorter: "alpha".to_string(),
                operations_sorter: "method".to_string(),
                hide_models: true,
            })
            .servers(ServersConfig {
                base_server_url: None,
                default_origin: Some("http://localhost:3000/docs".to_string()),
            })
            .build();

        let context = ReferenceContext::from_config(&config);
        let options = context.traverse_options();
        assert_eq!(options.document_id, "petstore");
        assert!(options.hide_models);
        assert!(matches!(options.sidebar.tags_sorter, TagsSorter::Alpha));
        assert!(matches!(options.sidebar.operations_sorter, OperationsSorter::Method));
        assert_eq!(context.origin.origin(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_from_config_unknown_sorter_falls_back() {
        let mut config = MeridianConfig::default();
        config.navigation.tags_sorter = "random".to_string();

        let context = ReferenceContext::from_config(&config);
        assert!(matches!(context.traverse_options().sidebar.tags_sorter, TagsSorter::Unsorted));
    }

    #[test]
    fn test_servers_use_injected_origin() {
        let context = ReferenceContext::new().with_origin(StaticOrigin::new("http://localhost:8080"));
        let document = petstore_document();

        let servers = context.servers(&document, None);
        assert_eq!(servers[0].url, "http://localhost:8080/api/v1");
        assert_eq!(servers[1].url, "https://api.example.com");
    }

    #[test]
    fn test_servers_prefer_base_server_url() {
        let context = ReferenceContext::new()
            .with_base_server_url("https://gateway.example.com/")
            .with_origin(StaticOrigin::new("http://localhost:8080"));
        let document = petstore_document();

        let servers = context.servers(&document, Some("https://docs.example.com/spec.json"));
        assert_eq!(servers[0].url, "https://gateway.example.com/api/v1");
    }

    #[test]
    fn test_active_security_for_operation() {
        let context = ReferenceContext::new();
        let mut document = petstore_document();

        let operation = document.operation("/pets", HttpMethod::Get);
        assert!(context.active_security(&document, operation).is_empty());

        document.set_operation_security = true;
        let operation = document.operation("/pets", HttpMethod::Get);
        let active = context.active_security(&document, operation);
        let names: Vec<&str> = active.iter().map(|scheme| scheme.name).collect();
        assert_eq!(names, vec!["apiKey"]);
    }

    #[test]
    fn test_index_matches_tag_entries() {
        let context = ReferenceContext::new();
        let document = petstore_document();
        let tree = context.traverse(&document);

        let entries = context.tag_entries(&tree);
        let index = context.index(&tree);
        for name in entries.keys() {
            assert_eq!(index.tag_occurrences(name).len(), entries[name].len());
        }
    }
}
