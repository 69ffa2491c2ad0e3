//! # Meridian Navigation
//!
//! Sidebar construction and tag indexing for OpenAPI reference navigation.
//!
//! - [`traverse_document`] - Build a full navigation tree from a document
//! - [`build_sidebar`] - Sort, filter and group tag entries
//! - [`get_tag_entries`] / [`NavigationIndex`] - Name-keyed tag lookup with
//!   parent back-references
//! - [`TagsSorter`] / [`OperationsSorter`] - Pluggable orderings
//!
//! ## Example
//!
//! ```
//! use meridian_core::fixtures;
//! use meridian_navigation::{
//!     get_tag_entries, traverse_document, SidebarOptions, TagsSorter, TraverseOptions,
//! };
//!
//! let document = fixtures::petstore_document();
//! let options = TraverseOptions {
//!     sidebar: SidebarOptions::default().with_tags_sorter(TagsSorter::Alpha),
//!     ..Default::default()
//! };
//!
//! let tree = traverse_document(&document, &options);
//! let tags = get_tag_entries(&tree);
//! assert!(tags.contains_key("pets"));
//! assert!(!tags.contains_key("admin"));
//! ```

#![doc(html_root_url = "https://docs.rs/meridian-navigation/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod index;
mod sidebar;
mod sort;
mod traverse;

pub use index::{get_tag_entries, NavigationIndex, Node, NodeId, TagEntries, WithParent};
pub use sidebar::{
    build_sidebar, default_tag_id, SidebarOptions, TagIdFn, TagsDict, TagsMap, TitlesMap,
};
pub use sort::{
    locale_compare, OperationComparator, OperationSortKey, OperationsSorter, TagComparator,
    TagsSorter,
};
pub use traverse::{
    collect_tags_map, default_operation_id, description_entries, tags_dict, traverse_document,
    traverse_document_with_titles, OperationIdFn, TraverseOptions, MODELS_TITLE, WEBHOOKS_TITLE,
};
