//! Tag indexing over a traversed navigation tree.
//!
//! [`NavigationIndex`] flattens a [`TraversedDocument`] into an arena of
//! borrowed nodes. Every node knows its parent by [`NodeId`], so upward walks
//! ("which group contains this tag?") never need owning back-pointers.
//!
//! [`get_tag_entries`] builds the name-keyed view most callers want:
//!
//! ```
//! use meridian_core::fixtures;
//! use meridian_navigation::get_tag_entries;
//!
//! let tree = fixtures::grouped_tree();
//! let entries = get_tag_entries(&tree);
//!
//! // `pets` sits in two groups.
//! let pets = &entries["pets"];
//! assert_eq!(pets.len(), 2);
//! assert_eq!(pets[0].parent_node.id(), "group/Core");
//! assert_eq!(pets[1].parent_node.id(), "group/Extras");
//! ```

use indexmap::IndexMap;
use meridian_core::{TraversedDocument, TraversedEntry, TraversedTag};
use tracing::trace;

/// Arena handle for a node in a [`NavigationIndex`].
///
/// Handles are only meaningful for the index that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    /// Position in the arena, in depth-first discovery order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A borrowed view of one node: the document root or an entry below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// The document root.
    Document(&'a TraversedDocument),
    /// Any entry below the root.
    Entry(&'a TraversedEntry),
}

impl<'a> Node<'a> {
    /// Stable identifier of the node.
    pub fn id(self) -> &'a str {
        match self {
            Node::Document(doc) => &doc.id,
            Node::Entry(entry) => entry.id(),
        }
    }

    /// Display title of the node.
    pub fn title(self) -> &'a str {
        match self {
            Node::Document(doc) => &doc.title,
            Node::Entry(entry) => entry.title(),
        }
    }

    /// Raw name, when the node has one.
    pub fn name(self) -> Option<&'a str> {
        match self {
            Node::Document(doc) => Some(&doc.name),
            Node::Entry(entry) => entry.name(),
        }
    }

    /// Direct children of the node.
    pub fn children(self) -> &'a [TraversedEntry] {
        match self {
            Node::Document(doc) => &doc.children,
            Node::Entry(entry) => entry.children(),
        }
    }

    /// The entry, unless this is the document root.
    pub fn as_entry(self) -> Option<&'a TraversedEntry> {
        match self {
            Node::Document(_) => None,
            Node::Entry(entry) => Some(entry),
        }
    }

    /// The tag payload, if this node is a tag entry.
    pub fn as_tag(self) -> Option<&'a TraversedTag> {
        self.as_entry().and_then(TraversedEntry::as_tag)
    }

    /// Whether this node is the document root.
    pub fn is_document(self) -> bool {
        matches!(self, Node::Document(_))
    }
}

/// A tag entry decorated with its immediate parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithParent<'a> {
    /// The tag entry.
    pub entry: &'a TraversedTag,
    /// Arena handle of the entry itself.
    pub node: NodeId,
    /// Arena handle of the nearest enclosing node.
    pub parent: NodeId,
    /// The nearest enclosing node (a group, a container or the document).
    pub parent_node: Node<'a>,
}

/// Tag name to every occurrence of that tag, in depth-first document order.
pub type TagEntries<'a> = IndexMap<&'a str, Vec<WithParent<'a>>>;

#[derive(Debug)]
struct Slot<'a> {
    node: Node<'a>,
    parent: Option<NodeId>,
}

/// Arena over a borrowed navigation tree.
#[derive(Debug)]
pub struct NavigationIndex<'a> {
    slots: Vec<Slot<'a>>,
    tags: IndexMap<&'a str, Vec<NodeId>>,
}

impl<'a> NavigationIndex<'a> {
    /// Index every node of `document`.
    ///
    /// Tag entries are recorded under their name. Other containers (such as
    /// the models list) are walked but not recorded as tags.
    pub fn new(document: &'a TraversedDocument) -> Self {
        let mut index = Self {
            slots: vec![Slot {
                node: Node::Document(document),
                parent: None,
            }],
            tags: IndexMap::new(),
        };
        index.visit(&document.children, NodeId::ROOT);
        trace!(
            document = %document.id,
            nodes = index.slots.len(),
            tags = index.tags.len(),
            "Indexed navigation tree"
        );
        index
    }

    fn visit(&mut self, children: &'a [TraversedEntry], parent: NodeId) {
        for entry in children {
            let id = NodeId(self.slots.len());
            self.slots.push(Slot {
                node: Node::Entry(entry),
                parent: Some(parent),
            });
            if let TraversedEntry::Tag(tag) = entry {
                self.tags.entry(tag.name.as_str()).or_default().push(id);
            }
            self.visit(entry.children(), id);
        }
    }

    /// Handle of the document root.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index holds no nodes.
    ///
    /// An index built by [`NavigationIndex::new`] always contains the
    /// document root, so this is `false` for every constructed index.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The node behind a handle.
    pub fn node(&self, id: NodeId) -> Option<Node<'a>> {
        self.slots.get(id.0).map(|slot| slot.node)
    }

    /// The parent of a node. `None` for the root and for unknown handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Walk upward from a node, nearest ancestor first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// First node (in document order) whose id equals `id`.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.slots
            .iter()
            .position(|slot| slot.node.id() == id)
            .map(NodeId)
    }

    /// Every occurrence of the tag named `name`.
    pub fn tag_occurrences(&self, name: &str) -> &[NodeId] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The nearest enclosing `x-tagGroups` group of a node, if any.
    pub fn enclosing_group(&self, id: NodeId) -> Option<&'a TraversedTag> {
        self.ancestors(id)
            .filter_map(|ancestor| self.node(ancestor).and_then(Node::as_tag))
            .find(|tag| tag.is_group)
    }

    /// Name-keyed view of every tag occurrence with its parent.
    pub fn tag_entries(&self) -> TagEntries<'a> {
        self.tags
            .iter()
            .map(|(name, ids)| {
                let occurrences = ids.iter().filter_map(|id| self.with_parent(*id)).collect();
                (*name, occurrences)
            })
            .collect()
    }

    fn with_parent(&self, id: NodeId) -> Option<WithParent<'a>> {
        let entry = self.node(id)?.as_tag()?;
        let parent = self.parent(id)?;
        Some(WithParent {
            entry,
            node: id,
            parent,
            parent_node: self.node(parent)?,
        })
    }
}

/// Build the tag name to occurrences map for `document`.
///
/// A tag appearing in N places yields N entries, each carrying its nearest
/// enclosing node. A document without children yields an empty map.
pub fn get_tag_entries(document: &TraversedDocument) -> TagEntries<'_> {
    NavigationIndex::new(document).tag_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::fixtures::{group, grouped_tree, operation_entry, tag_entry};
    use meridian_core::{HttpMethod, TraversedModels};

    #[test]
    fn test_empty_document_index_holds_root() {
        let tree = document(Vec::new());
        let index = NavigationIndex::new(&tree);
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
        assert!(index.node(index.root()).unwrap().is_document());
        assert!(index.tag_entries().is_empty());
    }

    fn document(children: Vec<TraversedEntry>) -> TraversedDocument {
        TraversedDocument {
            id: "doc-1".to_string(),
            name: "Test API".to_string(),
            title: "Test API".to_string(),
            children,
        }
    }

    #[test]
    fn test_empty_document() {
        let doc = document(Vec::new());
        assert!(get_tag_entries(&doc).is_empty());
    }

    #[test]
    fn test_operations_only() {
        let doc = document(vec![operation_entry(HttpMethod::Get, "/users", "Get users")]);
        assert!(get_tag_entries(&doc).is_empty());
    }

    #[test]
    fn test_single_tag_parent_is_document() {
        let doc = document(vec![tag_entry("Users", Vec::new())]);
        let entries = get_tag_entries(&doc);

        assert_eq!(entries.len(), 1);
        let users = &entries["Users"][0];
        assert_eq!(users.entry.id, "tag/Users");
        assert_eq!(users.parent, NodeId::ROOT);
        assert!(users.parent_node.is_document());
        assert_eq!(users.parent_node.id(), "doc-1");
    }

    #[test]
    fn test_tags_at_same_level_keep_order() {
        let doc = document(vec![
            tag_entry("Users", Vec::new()),
            tag_entry("Posts", Vec::new()),
            tag_entry("Comments", Vec::new()),
        ]);
        let names: Vec<_> = get_tag_entries(&doc).keys().copied().collect();
        assert_eq!(names, vec!["Users", "Posts", "Comments"]);
    }

    #[test]
    fn test_duplicate_tags_merge_in_traversal_order() {
        let tree = grouped_tree();
        let entries = get_tag_entries(&tree);

        let pets = &entries["pets"];
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].parent_node.id(), "group/Core");
        assert_eq!(pets[1].parent_node.id(), "group/Extras");
        assert!(pets[0].node < pets[1].node);
    }

    #[test]
    fn test_groups_are_indexed_too() {
        let tree = grouped_tree();
        let entries = get_tag_entries(&tree);

        assert_eq!(entries["Core"].len(), 1);
        assert!(entries["Core"][0].entry.is_group);
        assert!(entries["Core"][0].parent_node.is_document());
    }

    #[test]
    fn test_deeply_nested_tag_has_immediate_parent() {
        let doc = document(vec![group(
            "Outer",
            vec![group("Inner", vec![tag_entry("Leaf", Vec::new())])],
        )]);
        let index = NavigationIndex::new(&doc);
        let entries = index.tag_entries();

        let leaf = &entries["Leaf"][0];
        assert_eq!(leaf.parent_node.id(), "group/Inner");

        let chain: Vec<_> = index
            .ancestors(leaf.node)
            .filter_map(|id| index.node(id))
            .map(Node::id)
            .collect();
        assert_eq!(chain, vec!["group/Inner", "group/Outer", "doc-1"]);
    }

    #[test]
    fn test_models_container_recursed_not_indexed() {
        let doc = document(vec![TraversedEntry::Models(TraversedModels {
            id: "models".to_string(),
            name: "models".to_string(),
            title: "Models".to_string(),
            children: vec![tag_entry("Schemas", Vec::new())],
        })]);
        let entries = get_tag_entries(&doc);

        assert!(!entries.contains_key("models"));
        let nested = &entries["Schemas"][0];
        assert_eq!(nested.parent_node.id(), "models");
        assert!(!nested.parent_node.is_document());
    }

    #[test]
    fn test_find_and_enclosing_group() {
        let tree = grouped_tree();
        let index = NavigationIndex::new(&tree);

        let users = index.find("tag/users").unwrap();
        assert_eq!(index.enclosing_group(users).unwrap().name, "Core");

        let op = index.find("get/users").unwrap();
        assert_eq!(index.parent(op), Some(users));
        assert_eq!(index.enclosing_group(op).unwrap().name, "Core");

        assert!(index.find("missing").is_none());
        assert!(index.enclosing_group(index.root()).is_none());
    }

    #[test]
    fn test_arena_accessors() {
        let tree = grouped_tree();
        let index = NavigationIndex::new(&tree);

        // root, 2 groups, 3 tags, 1 operation, models, 1 schema
        assert_eq!(index.len(), 9);
        assert!(!index.is_empty());
        assert!(index.parent(index.root()).is_none());
        assert_eq!(index.tag_occurrences("pets").len(), 2);
        assert!(index.tag_occurrences("nope").is_empty());
        assert_eq!(index.node(NodeId::ROOT).unwrap().title(), "Pet Store");
        assert!(index.node(NodeId(100)).is_none());
    }
}
