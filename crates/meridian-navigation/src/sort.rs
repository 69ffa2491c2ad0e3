//! Pluggable sort modes for tags and operations.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use meridian_core::{HttpMethod, OpenApiDocument, Tag, TraversedEntry};

/// Comparator over resolved tags.
pub type TagComparator = Arc<dyn Fn(&Tag, &Tag) -> Ordering + Send + Sync>;

/// Comparator over operation sort keys.
pub type OperationComparator =
    Arc<dyn Fn(&OperationSortKey<'_>, &OperationSortKey<'_>) -> Ordering + Send + Sync>;

/// How tags are ordered in the sidebar.
#[derive(Clone, Default)]
pub enum TagsSorter {
    /// Keep the order tags were collected in.
    #[default]
    Unsorted,
    /// Locale-style comparison of `x-displayName`, falling back to the tag key.
    Alpha,
    /// Caller-supplied comparator. Unknown keys arrive as `{name: key}` placeholders.
    Custom(TagComparator),
}

impl TagsSorter {
    /// Wrap a comparator closure.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Tag, &Tag) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    /// Parse a named mode: `alpha` or `none`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "alpha" => Some(Self::Alpha),
            "none" | "" => Some(Self::Unsorted),
            _ => None,
        }
    }
}

impl fmt::Debug for TagsSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted => f.write_str("Unsorted"),
            Self::Alpha => f.write_str("Alpha"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How entries inside a tag are ordered.
#[derive(Clone, Default)]
pub enum OperationsSorter {
    /// Keep collection order.
    #[default]
    Unsorted,
    /// Locale-style comparison of entry titles.
    Alpha,
    /// Lexicographic comparison of the lowercase HTTP verb.
    Method,
    /// Caller-supplied comparator.
    Custom(OperationComparator),
}

impl OperationsSorter {
    /// Wrap a comparator closure.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&OperationSortKey<'_>, &OperationSortKey<'_>) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    /// Parse a named mode: `alpha`, `method` or `none`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "alpha" => Some(Self::Alpha),
            "method" => Some(Self::Method),
            "none" | "" => Some(Self::Unsorted),
            _ => None,
        }
    }

    /// Return `entries` ordered by this mode. Sorting is stable.
    pub fn sorted(
        &self,
        entries: &[TraversedEntry],
        document: &OpenApiDocument,
    ) -> Vec<TraversedEntry> {
        let mut refs: Vec<&TraversedEntry> = entries.iter().collect();
        match self {
            Self::Unsorted => {}
            Self::Alpha => refs.sort_by(|a, b| locale_compare(a.title(), b.title())),
            Self::Method => refs.sort_by(|a, b| verb(a).cmp(verb(b))),
            Self::Custom(compare) => {
                let mut keyed: Vec<_> = refs
                    .into_iter()
                    .map(|entry| (OperationSortKey::resolve(entry, document), entry))
                    .collect();
                keyed.sort_by(|(a, _), (b, _)| compare(a, b));
                refs = keyed.into_iter().map(|(_, entry)| entry).collect();
            }
        }
        refs.into_iter().cloned().collect()
    }
}

impl fmt::Debug for OperationsSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted => f.write_str("Unsorted"),
            Self::Alpha => f.write_str("Alpha"),
            Self::Method => f.write_str("Method"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn verb(entry: &TraversedEntry) -> &'static str {
    entry.method().map_or("", HttpMethod::as_str)
}

/// What a custom operations comparator sees for each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSortKey<'a> {
    /// Entry title.
    pub title: &'a str,
    /// Path template (empty for entries without one).
    pub path: &'a str,
    /// HTTP method, for operations and webhooks.
    pub method: Option<HttpMethod>,
    /// `operationId` of the underlying operation, when it can be found.
    pub operation_id: Option<&'a str>,
    /// `summary` of the underlying operation, when it can be found.
    pub summary: Option<&'a str>,
}

impl<'a> OperationSortKey<'a> {
    /// Build the key for `entry`, looking the operation up in `document`.
    pub fn resolve(entry: &'a TraversedEntry, document: &'a OpenApiDocument) -> Self {
        let operation = match entry {
            TraversedEntry::Operation(op) => document.operation(&op.path, op.method),
            TraversedEntry::Webhook(hook) => document
                .webhooks
                .get(&hook.name)
                .and_then(|item| item.operation(hook.method)),
            _ => None,
        };
        Self {
            title: entry.title(),
            path: entry.path().unwrap_or_default(),
            method: entry.method(),
            operation_id: operation.and_then(|op| op.operation_id.as_deref()),
            summary: operation.and_then(|op| op.summary.as_deref()),
        }
    }
}

/// Locale-style string comparison.
///
/// Case-insensitive first; strings that differ only in case put lowercase
/// before uppercase, so `a < A < b`.
///
/// Characters compare by lowercased code point, not by collation rules.
/// Accented letters therefore sort after every ASCII letter (`"f" < "é"`),
/// where a locale-aware collator would place `é` next to `e`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}
