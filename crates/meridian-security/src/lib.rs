//! # Meridian Security
//!
//! Works out which security schemes are active for an operation, given the
//! requirements it declares and the user's (or document's) current selection.
//!
//! ```
//! use meridian_core::fixtures;
//! use meridian_security::filter_selected_security;
//!
//! let document = fixtures::petstore_document();
//! let operation = document.operation("/pets", meridian_core::HttpMethod::Get);
//!
//! // Nothing selected and no `x-scalar-set-operation-security`: nothing active.
//! assert!(filter_selected_security(&document, operation).is_empty());
//! ```

#![doc(html_root_url = "https://docs.rs/meridian-security/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod resolve;

pub use resolve::{
    effective_requirements, fallback_requirement, filter_selected_security, requirement_key,
    resolve_active_security, ActiveScheme,
};
