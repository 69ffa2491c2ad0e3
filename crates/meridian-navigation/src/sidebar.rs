//! Sidebar construction.
//!
//! [`build_sidebar`] turns a tag key to entries map into the ordered,
//! filtered tree a sidebar renders:
//!
//! 1. With `x-tagGroups`, each group becomes one `isGroup` tag node holding
//!    its member tags. Groups left without visible members are dropped.
//! 2. Without groups, every key of the tags map is used.
//! 3. Keys are ordered by [`TagsSorter`].
//! 4. Hidden tags (`x-internal`, `x-scalar-ignore`) and empty tags are
//!    skipped; the rest have their entries ordered by [`OperationsSorter`].
//! 5. A lone top-level `default` tag is replaced by its children.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use meridian_core::{OpenApiDocument, Tag, TraversedEntry, TraversedTag, DEFAULT_TAG};
use tracing::{debug, trace};

use crate::sort::{locale_compare, OperationsSorter, TagsSorter};

/// Tag key to the entries collected under it, in collection order.
pub type TagsMap = IndexMap<String, Vec<TraversedEntry>>;

/// Tag key to tag metadata.
pub type TagsDict = IndexMap<String, Tag>;

/// Node id to display title, filled in while building.
pub type TitlesMap = HashMap<String, String>;

/// Strategy producing a stable node id for a tag.
pub type TagIdFn = Arc<dyn Fn(&Tag) -> String + Send + Sync>;

/// Options for [`build_sidebar`].
#[derive(Clone)]
pub struct SidebarOptions {
    /// Id strategy for tag and group nodes.
    pub get_tag_id: TagIdFn,
    /// Tag ordering.
    pub tags_sorter: TagsSorter,
    /// Ordering of entries inside each tag.
    pub operations_sorter: OperationsSorter,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            get_tag_id: Arc::new(default_tag_id),
            tags_sorter: TagsSorter::default(),
            operations_sorter: OperationsSorter::default(),
        }
    }
}

impl SidebarOptions {
    /// Set the tag ordering.
    pub fn with_tags_sorter(mut self, sorter: TagsSorter) -> Self {
        self.tags_sorter = sorter;
        self
    }

    /// Set the entry ordering.
    pub fn with_operations_sorter(mut self, sorter: OperationsSorter) -> Self {
        self.operations_sorter = sorter;
        self
    }

    /// Set the tag id strategy.
    pub fn with_tag_id<F>(mut self, get_tag_id: F) -> Self
    where
        F: Fn(&Tag) -> String + Send + Sync + 'static,
    {
        self.get_tag_id = Arc::new(get_tag_id);
        self
    }
}

impl fmt::Debug for SidebarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarOptions")
            .field("tags_sorter", &self.tags_sorter)
            .field("operations_sorter", &self.operations_sorter)
            .finish_non_exhaustive()
    }
}

/// Default tag id: `tag/{name}`.
pub fn default_tag_id(tag: &Tag) -> String {
    format!("tag/{}", tag.name)
}

/// Build the sidebar entries for `document`.
///
/// Every emitted tag or group node has its `id → title` pair recorded in
/// `titles`. Keys missing from `tags_dict` are treated as `{name: key}`.
pub fn build_sidebar(
    document: &OpenApiDocument,
    tags_map: &TagsMap,
    tags_dict: &TagsDict,
    titles: &mut TitlesMap,
    options: &SidebarOptions,
) -> Vec<TraversedEntry> {
    let builder = SidebarBuilder {
        document,
        tags_map,
        tags_dict,
        options,
    };

    let mut entries = if document.tag_groups.is_empty() {
        builder.tag_entries(tags_map.keys().map(String::as_str), titles)
    } else {
        document
            .tag_groups
            .iter()
            .filter_map(|group| {
                let children =
                    builder.tag_entries(group.tags.iter().map(String::as_str), titles);
                if children.is_empty() {
                    trace!(group = %group.name, "Dropping tag group without visible tags");
                    return None;
                }
                let id = (options.get_tag_id)(&Tag::named(group.name.as_str()));
                titles.insert(id.clone(), group.name.clone());
                Some(TraversedEntry::Tag(TraversedTag {
                    id,
                    name: group.name.clone(),
                    title: group.name.clone(),
                    description: None,
                    is_group: true,
                    children,
                }))
            })
            .collect()
    };

    if let [TraversedEntry::Tag(only)] = entries.as_slice() {
        if !only.is_group && only.title == DEFAULT_TAG {
            trace!("Flattening lone default tag");
            if let Some(TraversedEntry::Tag(only)) = entries.pop() {
                entries = only.children;
            }
        }
    }

    debug!(
        entries = entries.len(),
        grouped = !document.tag_groups.is_empty(),
        "Built sidebar"
    );
    entries
}

struct SidebarBuilder<'a> {
    document: &'a OpenApiDocument,
    tags_map: &'a TagsMap,
    tags_dict: &'a TagsDict,
    options: &'a SidebarOptions,
}

impl<'a> SidebarBuilder<'a> {
    fn resolve(&self, key: &str) -> Cow<'a, Tag> {
        match self.tags_dict.get(key) {
            Some(tag) => Cow::Borrowed(tag),
            None => Cow::Owned(Tag::named(key)),
        }
    }

    fn tag_entries<'k>(
        &self,
        keys: impl Iterator<Item = &'k str>,
        titles: &mut TitlesMap,
    ) -> Vec<TraversedEntry> {
        let mut tags: Vec<(&str, Cow<'a, Tag>)> =
            keys.map(|key| (key, self.resolve(key))).collect();

        match &self.options.tags_sorter {
            TagsSorter::Unsorted => {}
            TagsSorter::Alpha => tags.sort_by(|(key_a, tag_a), (key_b, tag_b)| {
                locale_compare(alpha_key(key_a, tag_a), alpha_key(key_b, tag_b))
            }),
            TagsSorter::Custom(compare) => tags.sort_by(|(_, a), (_, b)| compare(&**a, &**b)),
        }

        tags.into_iter()
            .filter_map(|(key, tag)| self.tag_entry(key, &tag, titles))
            .collect()
    }

    fn tag_entry(&self, key: &str, tag: &Tag, titles: &mut TitlesMap) -> Option<TraversedEntry> {
        if tag.is_hidden() {
            trace!(tag = %key, "Skipping hidden tag");
            return None;
        }
        let entries = self.tags_map.get(key).filter(|entries| !entries.is_empty())?;
        let children = self.options.operations_sorter.sorted(entries, self.document);

        let id = (self.options.get_tag_id)(tag);
        let title = tag.title().to_string();
        titles.insert(id.clone(), title.clone());

        Some(TraversedEntry::Tag(TraversedTag {
            id,
            name: key.to_string(),
            title,
            description: tag.description.clone(),
            is_group: false,
            children,
        }))
    }
}

fn alpha_key<'t>(key: &'t str, tag: &'t Tag) -> &'t str {
    tag.display_name.as_deref().unwrap_or(key)
}
