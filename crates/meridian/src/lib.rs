//! # Meridian
//!
//! **Navigation and context resolution for OpenAPI reference pages**
//!
//! Meridian turns an OpenAPI document into what a reference UI needs to
//! render it:
//!
//! - **Navigation** – a sidebar tree of tags, tag groups, operations,
//!   webhooks and models, plus a name-keyed tag index with parent links
//! - **Security** – the schemes to pre-select for an operation given the
//!   user's saved selection
//! - **Servers** – the effective server list with relative URLs resolved
//!   against a base URL, the document origin or the host origin
//!
//! ## Quick Start
//!
//! ```
//! use meridian::prelude::*;
//!
//! let document = OpenApiDocument::from_json_str(r#"{
//!     "openapi": "3.1.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "servers": [{ "url": "/v1" }],
//!     "paths": {
//!         "/pets": { "get": { "summary": "List pets", "tags": ["pets"] } }
//!     }
//! }"#)?;
//!
//! let context = ReferenceContext::new();
//! let tree = context.traverse(&document);
//! assert_eq!(context.tag_entries(&tree)["pets"].len(), 1);
//!
//! let servers = context.servers(&document, Some("https://pets.example.com/openapi.json"));
//! assert_eq!(servers[0].url, "https://pets.example.com/v1");
//! # Ok::<(), CoreError>(())
//! ```
//!
//! ## Crates
//!
//! ```text
//! meridian-core        document model, traversed tree
//! meridian-navigation  traversal, sidebar, tag index
//! meridian-security    active security schemes
//! meridian-servers     server list, origin provider
//! meridian-config      layered configuration
//! meridian-telemetry   logging setup
//! ```

#![doc(html_root_url = "https://docs.rs/meridian/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;

pub use context::ReferenceContext;

// Re-export member crates
pub use meridian_config as config;
pub use meridian_core as core;
pub use meridian_navigation as navigation;
pub use meridian_security as security;
pub use meridian_servers as servers;
pub use meridian_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```
/// use meridian::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ReferenceContext;

    pub use meridian_config::{ConfigError, ConfigLoader, MeridianConfig};

    pub use meridian_core::{
        CoreError, CoreResult, HttpMethod, OpenApiDocument, Operation, SecurityRequirement,
        SecurityScheme, SelectedSecurity, Server, Tag, TraversedDocument, TraversedEntry,
        TraversedTag,
    };

    pub use meridian_navigation::{
        build_sidebar, get_tag_entries, traverse_document, NavigationIndex, OperationsSorter,
        SidebarOptions, TagEntries, TagsSorter, TraverseOptions, WithParent,
    };

    pub use meridian_security::{filter_selected_security, resolve_active_security, ActiveScheme};

    pub use meridian_servers::{
        resolve_servers, NoOrigin, OriginProvider, ServerResolveOptions, StaticOrigin,
    };

    pub use meridian_telemetry::{init_from_config, init_logging, LogConfig};
}
