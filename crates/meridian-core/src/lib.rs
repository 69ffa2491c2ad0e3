//! # Meridian Core
//!
//! Document model and navigation tree types for Meridian.
//!
//! This crate provides the foundational types every other Meridian crate reads:
//!
//! - [`OpenApiDocument`] - The subset of an OpenAPI 3.x document that navigation,
//!   security and server resolution consume, including the `x-tagGroups`,
//!   `x-displayName`, `x-internal` and `x-scalar-*` extensions
//! - [`TraversedDocument`] / [`TraversedEntry`] - The derived navigation tree
//! - [`CoreError`] - Document loading errors
//!
//! Nothing here performs resolution; see `meridian-navigation`,
//! `meridian-security` and `meridian-servers`.

#![doc(html_root_url = "https://docs.rs/meridian-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod fixtures;
pub mod navigation;
pub mod openapi;

pub use error::{CoreError, CoreResult};
pub use navigation::{
    escape_pointer_segment, TraversedDocument, TraversedEntry, TraversedModels,
    TraversedOperation, TraversedSchema, TraversedTag, TraversedText, TraversedWebhook,
};
pub use openapi::{
    Components, ExternalDocumentation, HttpMethod, Info, OpenApiDocument, Operation, PathItem,
    SecurityRequirement, SecurityScheme, SelectedSecurity, Server, ServerVariable, Tag, TagGroup,
    DEFAULT_TAG, UNTITLED_TAG,
};
