//! Whole-document traversal.
//!
//! Builds a complete [`TraversedDocument`] from an [`OpenApiDocument`]:
//! description headings, the tag sidebar, a `Webhooks` tag and a models
//! container, in that order.

use std::fmt;
use std::sync::Arc;

use meridian_core::{
    escape_pointer_segment, HttpMethod, OpenApiDocument, Operation, TraversedDocument,
    TraversedEntry, TraversedModels, TraversedOperation, TraversedSchema, TraversedTag,
    TraversedText, TraversedWebhook, DEFAULT_TAG,
};
use tracing::{debug, trace};

use crate::sidebar::{build_sidebar, SidebarOptions, TagsDict, TagsMap, TitlesMap};

/// Strategy producing a stable node id for an operation under a tag.
///
/// Arguments are the tag key, the method and the path.
pub type OperationIdFn = Arc<dyn Fn(&str, HttpMethod, &str) -> String + Send + Sync>;

/// Title of the webhooks tag.
pub const WEBHOOKS_TITLE: &str = "Webhooks";

/// Title of the models container.
pub const MODELS_TITLE: &str = "Models";

/// Options for [`traverse_document`].
#[derive(Clone)]
pub struct TraverseOptions {
    /// Id of the produced document root.
    pub document_id: String,
    /// Sidebar ids and ordering.
    pub sidebar: SidebarOptions,
    /// Id strategy for operation entries.
    pub get_operation_id: OperationIdFn,
    /// Leave the models container out.
    pub hide_models: bool,
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            document_id: "document".to_string(),
            sidebar: SidebarOptions::default(),
            get_operation_id: Arc::new(default_operation_id),
            hide_models: false,
        }
    }
}

impl fmt::Debug for TraverseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraverseOptions")
            .field("document_id", &self.document_id)
            .field("sidebar", &self.sidebar)
            .field("hide_models", &self.hide_models)
            .finish_non_exhaustive()
    }
}

/// Default operation id: `tag/{tag}/{method}{path}`.
pub fn default_operation_id(tag: &str, method: HttpMethod, path: &str) -> String {
    format!("tag/{tag}/{method}{path}")
}

/// Tag metadata keyed by tag name, in declaration order.
pub fn tags_dict(document: &OpenApiDocument) -> TagsDict {
    document
        .tags
        .iter()
        .map(|tag| (tag.name.clone(), tag.clone()))
        .collect()
}

/// Collect operation entries per tag key.
///
/// Declared tags come first, in declaration order, even when empty. Then
/// paths are walked in order and each path's operations in verb order.
/// Hidden operations are skipped; untagged ones land under `default`; an
/// operation with several tags appears under each of them.
pub fn collect_tags_map(document: &OpenApiDocument, options: &TraverseOptions) -> TagsMap {
    let mut tags_map: TagsMap = document
        .tags
        .iter()
        .map(|tag| (tag.name.clone(), Vec::new()))
        .collect();

    for (path, item) in &document.paths {
        for (method, operation) in item.operations() {
            if operation.is_hidden() {
                trace!(%method, %path, "Skipping hidden operation");
                continue;
            }
            if operation.tags.is_empty() {
                let entry = operation_entry(DEFAULT_TAG, method, path, operation, options);
                tags_map.entry(DEFAULT_TAG.to_string()).or_default().push(entry);
                continue;
            }
            for tag in &operation.tags {
                let entry = operation_entry(tag, method, path, operation, options);
                tags_map.entry(tag.clone()).or_default().push(entry);
            }
        }
    }

    tags_map
}

fn operation_entry(
    tag: &str,
    method: HttpMethod,
    path: &str,
    operation: &Operation,
    options: &TraverseOptions,
) -> TraversedEntry {
    TraversedEntry::Operation(TraversedOperation {
        id: (options.get_operation_id)(tag, method, path),
        title: non_empty(operation.summary.as_deref()).unwrap_or(path).to_string(),
        reference: format!("#/paths/{}/{method}", escape_pointer_segment(path)),
        method,
        path: path.to_string(),
        deprecated: operation.deprecated,
    })
}

/// Traverse `document` into a navigation tree.
pub fn traverse_document(
    document: &OpenApiDocument,
    options: &TraverseOptions,
) -> TraversedDocument {
    let mut titles = TitlesMap::new();
    traverse_document_with_titles(document, options, &mut titles)
}

/// Traverse `document`, recording every node id and title in `titles`.
pub fn traverse_document_with_titles(
    document: &OpenApiDocument,
    options: &TraverseOptions,
    titles: &mut TitlesMap,
) -> TraversedDocument {
    let mut children = description_entries(
        document.info.description.as_deref().unwrap_or_default(),
        &options.document_id,
    );
    for entry in &children {
        titles.insert(entry.id().to_string(), entry.title().to_string());
    }

    let tags_map = collect_tags_map(document, options);
    let dict = tags_dict(document);
    children.extend(build_sidebar(document, &tags_map, &dict, titles, &options.sidebar));

    if let Some(webhooks) = webhooks_entry(document, options) {
        titles.insert(webhooks.id().to_string(), webhooks.title().to_string());
        children.push(webhooks);
    }

    if !options.hide_models {
        if let Some(models) = models_entry(document) {
            titles.insert(models.id().to_string(), models.title().to_string());
            children.push(models);
        }
    }

    debug!(
        document = %options.document_id,
        entries = children.len(),
        "Traversed document"
    );

    TraversedDocument {
        id: options.document_id.clone(),
        name: options.document_id.clone(),
        title: document.info.title.clone(),
        children,
    }
}

fn webhooks_entry(
    document: &OpenApiDocument,
    options: &TraverseOptions,
) -> Option<TraversedEntry> {
    let children: Vec<_> = document
        .webhooks
        .iter()
        .flat_map(|(name, item)| {
            item.operations()
                .filter(|(_, operation)| !operation.is_hidden())
                .map(move |(method, operation)| {
                    TraversedEntry::Webhook(TraversedWebhook {
                        id: format!("webhook/{method}/{name}"),
                        title: non_empty(operation.summary.as_deref())
                            .unwrap_or(name)
                            .to_string(),
                        name: name.clone(),
                        reference: format!(
                            "#/webhooks/{}/{method}",
                            escape_pointer_segment(name)
                        ),
                        method,
                    })
                })
        })
        .collect();

    if children.is_empty() {
        return None;
    }

    Some(TraversedEntry::Tag(TraversedTag {
        id: format!("{}/webhooks", options.document_id),
        name: "webhooks".to_string(),
        title: WEBHOOKS_TITLE.to_string(),
        description: None,
        is_group: false,
        children,
    }))
}

fn models_entry(document: &OpenApiDocument) -> Option<TraversedEntry> {
    let children: Vec<_> = document
        .components
        .schemas
        .iter()
        .filter(|(_, schema)| !schema_is_hidden(schema))
        .map(|(name, schema)| {
            TraversedEntry::Schema(TraversedSchema {
                id: format!("model/{name}"),
                name: name.clone(),
                title: non_empty(schema.get("title").and_then(serde_json::Value::as_str))
                    .unwrap_or(name)
                    .to_string(),
                reference: format!("#/components/schemas/{}", escape_pointer_segment(name)),
            })
        })
        .collect();

    if children.is_empty() {
        return None;
    }

    Some(TraversedEntry::Models(TraversedModels {
        id: "models".to_string(),
        name: "models".to_string(),
        title: MODELS_TITLE.to_string(),
        children,
    }))
}

fn schema_is_hidden(schema: &serde_json::Value) -> bool {
    ["x-internal", "x-scalar-ignore"]
        .iter()
        .any(|flag| schema.get(flag).and_then(serde_json::Value::as_bool) == Some(true))
}

/// Text entries for the shallowest Markdown headings of a description.
///
/// Headings inside fenced code blocks are ignored.
pub fn description_entries(description: &str, document_id: &str) -> Vec<TraversedEntry> {
    let mut in_fence = false;
    let headings: Vec<(usize, &str)> = description
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                return None;
            }
            if in_fence {
                return None;
            }
            heading(trimmed)
        })
        .collect();

    let Some(depth) = headings.iter().map(|(depth, _)| *depth).min() else {
        return Vec::new();
    };

    headings
        .into_iter()
        .filter(|(level, _)| *level == depth)
        .map(|(_, title)| {
            TraversedEntry::Text(TraversedText {
                id: format!("{document_id}/description/{}", slugify(title)),
                title: title.to_string(),
            })
        })
        .collect()
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let depth = line.chars().take_while(|c| *c == '#').count();
    if depth == 0 || depth > 6 {
        return None;
    }
    let rest = &line[depth..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let title = rest.trim().trim_end_matches('#').trim_end();
    (!title.is_empty()).then_some((depth, title))
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
