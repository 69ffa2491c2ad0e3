//! Effective server list resolution.

use indexmap::IndexMap;
use meridian_core::Server;
use tracing::{debug, trace, warn};
use url::Url;

use crate::origin::OriginProvider;

/// Per-call context for [`resolve_servers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerResolveOptions {
    /// Base URL that relative server URLs are joined onto first.
    pub base_server_url: Option<String>,
    /// URL the document was loaded from. Its origin is the second fallback.
    pub document_url: Option<String>,
}

impl ServerResolveOptions {
    /// Set the base server URL.
    pub fn with_base_server_url(mut self, url: impl Into<String>) -> Self {
        self.base_server_url = Some(url.into());
        self
    }

    /// Set the document URL.
    pub fn with_document_url(mut self, url: impl Into<String>) -> Self {
        self.document_url = Some(url.into());
        self
    }
}

/// Resolve the servers a client can use as base URLs.
///
/// Without declared servers, one server pointing at the document origin (or
/// else the ambient origin) is synthesized; with neither, the list is empty.
/// Declared servers keep their order; only URLs starting with `/` are
/// rewritten, joined onto the first available of the base server URL, the
/// document origin and the ambient origin.
pub fn resolve_servers(
    servers: Option<&[Server]>,
    options: &ServerResolveOptions,
    origin: &dyn OriginProvider,
) -> Vec<Server> {
    let context = Context::new(options, origin);
    let resolved = match servers {
        Some(servers) if !servers.is_empty() => servers
            .iter()
            .map(|server| context.resolve(server.clone()))
            .collect(),
        _ => context.fallback(),
    };
    debug!(servers = resolved.len(), "Resolved servers");
    resolved
}

/// Like [`resolve_servers`], for servers that have not been validated.
///
/// Non-array input synthesizes the fallback server. Entries that are not
/// valid server objects are dropped; if none are valid the fallback server is
/// synthesized.
pub fn resolve_servers_value(
    servers: &serde_json::Value,
    options: &ServerResolveOptions,
    origin: &dyn OriginProvider,
) -> Vec<Server> {
    let Some(entries) = servers.as_array() else {
        if !servers.is_null() {
            warn!("Servers must be an array, using the fallback server");
        }
        return resolve_servers(None, options, origin);
    };

    let parsed: Vec<Server> = entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Server>(entry.clone()) {
            Ok(server) => Some(server),
            Err(error) => {
                warn!(%error, server = %entry, "Dropping invalid server configuration");
                None
            }
        })
        .collect();

    resolve_servers(Some(parsed.as_slice()), options, origin)
}

struct Context<'a> {
    base_server_url: Option<&'a str>,
    document_origin: Option<String>,
    ambient_origin: Option<&'a str>,
}

impl<'a> Context<'a> {
    fn new(options: &'a ServerResolveOptions, origin: &'a dyn OriginProvider) -> Self {
        let document_origin = options.document_url.as_deref().and_then(|url| {
            let origin = document_origin(url);
            if origin.is_none() {
                trace!(%url, "Document URL has no usable origin");
            }
            origin
        });
        Self {
            base_server_url: options.base_server_url.as_deref().filter(|url| !url.is_empty()),
            document_origin,
            ambient_origin: origin.origin(),
        }
    }

    fn origin(&self) -> Option<&str> {
        self.document_origin.as_deref().or(self.ambient_origin)
    }

    fn fallback(&self) -> Vec<Server> {
        match self.origin() {
            Some(origin) => {
                trace!(%origin, "Synthesizing fallback server");
                vec![Server::new(origin)]
            }
            None => {
                trace!("No origin available for a fallback server");
                Vec::new()
            }
        }
    }

    fn resolve(&self, mut server: Server) -> Server {
        if !server.is_relative() {
            return server;
        }
        match self.base_server_url.or_else(|| self.origin()) {
            Some(base) => {
                server.url = combine_url_and_path(base, &server.url);
            }
            None => trace!(url = %server.url, "Leaving relative server URL unresolved"),
        }
        server
    }
}

/// Join a base URL and a path with exactly one `/` between them.
///
/// An empty path yields the base, an empty base yields the path, and equal
/// inputs yield the base.
pub fn combine_url_and_path(url: &str, path: &str) -> String {
    if path.is_empty() || url == path {
        return url.to_string();
    }
    if url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `scheme://host[:port]` of an absolute URL. Default ports are omitted.
///
/// Relative, unparseable and opaque-origin URLs yield `None`.
pub fn document_origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Expand `{name}` placeholders in a server URL.
///
/// Each placeholder takes its override when one is given and allowed by the
/// variable's `enum`, else the variable's default. Placeholders with neither
/// an override nor a declared variable are left as written.
pub fn substitute_variables(server: &Server, overrides: &IndexMap<String, String>) -> String {
    let mut result = String::with_capacity(server.url.len());
    let mut rest = server.url.as_str();

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        result.push_str(&rest[..start]);
        match variable_value(server, name, overrides) {
            Some(value) => result.push_str(value),
            None => result.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }

    result.push_str(rest);
    result
}

fn variable_value<'a>(
    server: &'a Server,
    name: &str,
    overrides: &'a IndexMap<String, String>,
) -> Option<&'a str> {
    let variable = server.variables.get(name);
    let allowed = |value: &&String| {
        variable.map_or(true, |variable| {
            variable.enum_values.is_empty() || variable.enum_values.contains(*value)
        })
    };
    match overrides.get(name) {
        Some(value) if allowed(&value) => Some(value.as_str()),
        Some(value) => {
            warn!(variable = %name, %value, "Server variable value not in enum, using default");
            variable.map(|variable| variable.default.as_str())
        }
        None => variable.map(|variable| variable.default.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::{NoOrigin, StaticOrigin};
    use meridian_core::ServerVariable;
    use serde_json::json;

    fn urls(servers: &[Server]) -> Vec<&str> {
        servers.iter().map(|server| server.url.as_str()).collect()
    }

    #[test]
    fn test_combine_url_and_path() {
        assert_eq!(
            combine_url_and_path("https://example.com", "api/users"),
            "https://example.com/api/users"
        );
        assert_eq!(
            combine_url_and_path("https://example.com/", "api/users"),
            "https://example.com/api/users"
        );
        assert_eq!(
            combine_url_and_path("https://example.com", "/api/users"),
            "https://example.com/api/users"
        );
        assert_eq!(
            combine_url_and_path("https://example.com//", "//api/users"),
            "https://example.com/api/users"
        );
        assert_eq!(combine_url_and_path("https://example.com", ""), "https://example.com");
        assert_eq!(combine_url_and_path("", "api/users"), "api/users");
        assert_eq!(combine_url_and_path("same", "same"), "same");
    }

    #[test]
    fn test_document_origin() {
        assert_eq!(
            document_origin("https://api.example.com:8080/docs/openapi.json").as_deref(),
            Some("https://api.example.com:8080")
        );
        assert_eq!(
            document_origin("https://api.example.com:443/x").as_deref(),
            Some("https://api.example.com")
        );
        assert!(document_origin("not a url").is_none());
        assert!(document_origin("/relative/openapi.json").is_none());
        assert!(document_origin("file:///tmp/openapi.json").is_none());
    }

    #[test]
    fn test_base_server_url_wins() {
        let servers = vec![Server::new("/api/v1")];
        let options = ServerResolveOptions::default()
            .with_base_server_url("https://base.x")
            .with_document_url("https://docs.x/y");
        let resolved = resolve_servers(Some(servers.as_slice()), &options, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["https://base.x/api/v1"]);
    }

    #[test]
    fn test_fallback_to_document_origin() {
        let options = ServerResolveOptions::default()
            .with_document_url("https://api.example.com:8080/docs/openapi.json");
        let resolved = resolve_servers(None, &options, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["https://api.example.com:8080"]);
        assert!(resolved[0].description.is_none());

        let empty: Vec<Server> = Vec::new();
        let resolved = resolve_servers(Some(empty.as_slice()), &options, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["https://api.example.com:8080"]);
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let servers = vec![Server::new("https://x.com/v1")];
        for options in [
            ServerResolveOptions::default(),
            ServerResolveOptions::default().with_base_server_url("https://base.x"),
            ServerResolveOptions::default().with_document_url("https://docs.x/y"),
        ] {
            let resolved =
                resolve_servers(Some(servers.as_slice()), &options, &StaticOrigin::new("https://o.x"));
            assert_eq!(urls(&resolved), vec!["https://x.com/v1"]);
        }
    }

    #[test]
    fn test_relative_resolution_chain() {
        let servers = vec![Server::new("/api")];

        let doc_only = ServerResolveOptions::default().with_document_url("https://docs.x/y");
        let resolved =
            resolve_servers(Some(servers.as_slice()), &doc_only, &StaticOrigin::new("https://o.x"));
        assert_eq!(urls(&resolved), vec!["https://docs.x/api"]);

        let invalid_doc = ServerResolveOptions::default().with_document_url("::bad::");
        let resolved =
            resolve_servers(Some(servers.as_slice()), &invalid_doc, &StaticOrigin::new("https://o.x"));
        assert_eq!(urls(&resolved), vec!["https://o.x/api"]);

        let resolved = resolve_servers(Some(servers.as_slice()), &invalid_doc, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["/api"]);
    }

    #[test]
    fn test_no_servers_no_origin() {
        let resolved = resolve_servers(None, &ServerResolveOptions::default(), &NoOrigin);
        assert!(resolved.is_empty());

        let resolved = resolve_servers(
            None,
            &ServerResolveOptions::default(),
            &StaticOrigin::new("https://o.x"),
        );
        assert_eq!(urls(&resolved), vec!["https://o.x"]);
    }

    #[test]
    fn test_fields_pass_through() {
        let mut server = Server::new("/v2");
        server.description = Some("Staging".to_string());
        server.variables.insert(
            "region".to_string(),
            ServerVariable {
                default: "eu".to_string(),
                ..Default::default()
            },
        );
        let servers = vec![server];
        let options = ServerResolveOptions::default().with_base_server_url("https://base.x/");
        let resolved = resolve_servers(Some(servers.as_slice()), &options, &NoOrigin);

        assert_eq!(resolved[0].url, "https://base.x/v2");
        assert_eq!(resolved[0].description.as_deref(), Some("Staging"));
        assert_eq!(resolved[0].variables["region"].default, "eu");
    }

    #[test]
    fn test_value_input_not_array() {
        let options = ServerResolveOptions::default().with_document_url("https://docs.x/y");
        for value in [json!(null), json!("https://x.com"), json!({"url": "/a"})] {
            let resolved = resolve_servers_value(&value, &options, &NoOrigin);
            assert_eq!(urls(&resolved), vec!["https://docs.x"]);
        }
    }

    #[test]
    fn test_value_input_drops_invalid_entries() {
        let options = ServerResolveOptions::default().with_base_server_url("https://base.x");
        let value = json!([{"url": 42}, {"url": "/ok"}, "nope", {"description": "no url"}]);
        let resolved = resolve_servers_value(&value, &options, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["https://base.x/ok"]);
    }

    #[test]
    fn test_value_input_all_invalid_falls_back() {
        let options = ServerResolveOptions::default().with_document_url("https://docs.x/y");
        let value = json!([{"url": 42}, null]);
        let resolved = resolve_servers_value(&value, &options, &NoOrigin);
        assert_eq!(urls(&resolved), vec!["https://docs.x"]);
    }

    #[test]
    fn test_substitute_variables() {
        let server: Server = serde_json::from_value(json!({
            "url": "https://{region}.example.com:{port}/{version}/{unknown}",
            "variables": {
                "region": {"default": "eu", "enum": ["eu", "us"]},
                "port": {"default": "443"},
                "version": {"default": "v1"}
            }
        }))
        .unwrap();

        let mut overrides = IndexMap::new();
        overrides.insert("port".to_string(), "8443".to_string());
        overrides.insert("region".to_string(), "ap".to_string());
        assert_eq!(
            substitute_variables(&server, &overrides),
            "https://eu.example.com:8443/v1/{unknown}"
        );

        overrides.insert("region".to_string(), "us".to_string());
        assert_eq!(
            substitute_variables(&server, &overrides),
            "https://us.example.com:8443/v1/{unknown}"
        );
    }

    #[test]
    fn test_substitute_unclosed_brace() {
        let server = Server::new("https://example.com/{open");
        assert_eq!(
            substitute_variables(&server, &IndexMap::new()),
            "https://example.com/{open"
        );
    }
}
