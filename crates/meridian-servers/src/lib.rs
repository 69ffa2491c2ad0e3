//! # Meridian Servers
//!
//! Resolves the effective, absolute server list for an OpenAPI document.
//!
//! Relative server URLs (`/api/v1`) are joined onto the first available of:
//! a configured base server URL, the origin of the URL the document was
//! loaded from, and the ambient origin supplied by an [`OriginProvider`].
//!
//! ```
//! use meridian_core::Server;
//! use meridian_servers::{resolve_servers, NoOrigin, ServerResolveOptions};
//!
//! let servers = vec![Server::new("/api/v1")];
//! let options = ServerResolveOptions::default().with_document_url("https://docs.example.com/openapi.json");
//!
//! let resolved = resolve_servers(Some(servers.as_slice()), &options, &NoOrigin);
//! assert_eq!(resolved[0].url, "https://docs.example.com/api/v1");
//! ```

#![doc(html_root_url = "https://docs.rs/meridian-servers/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod origin;
mod resolve;

pub use origin::{NoOrigin, OriginProvider, StaticOrigin};
pub use resolve::{
    combine_url_and_path, document_origin, resolve_servers, resolve_servers_value,
    substitute_variables, ServerResolveOptions,
};
