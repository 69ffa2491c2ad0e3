//! Test fixtures for Meridian development and testing.
//!
//! Pre-built documents and navigation trees shared by the tests of every
//! crate in the workspace.
//!
//! # Example
//!
//! ```
//! use meridian_core::fixtures;
//!
//! let document = fixtures::petstore_document();
//! assert!(document.tag("pets").is_some());
//! ```

use indexmap::IndexMap;

use crate::navigation::{
    escape_pointer_segment, TraversedDocument, TraversedEntry, TraversedModels,
    TraversedOperation, TraversedSchema, TraversedTag,
};
use crate::openapi::{
    Components, HttpMethod, Info, OpenApiDocument, Operation, PathItem, SecurityRequirement,
    SecurityScheme, Server, Tag,
};

/// Creates a pet store document.
///
/// Contents:
/// - tags `pets` (display name `Pets`), `users`, and `admin` (internal)
/// - `GET /pets`, `POST /pets` under `pets`, plus an internal `GET /pets/secret`
/// - `GET /users` under `users`, `GET /admin` under `admin`
/// - `GET /health` without tags
/// - a `newPet` webhook
/// - schemas `Pet`, `User` and an internal `AuditLog`
/// - security schemes `apiKey`, `bearer`, `oauth2`; document security `[{apiKey}]`
/// - servers `/api/v1` and `https://api.example.com`
pub fn petstore_document() -> OpenApiDocument {
    let mut paths = IndexMap::new();
    paths.insert(
        "/pets".to_string(),
        PathItem {
            get: Some(operation("listPets", "List pets", &["pets"])),
            post: Some(operation("createPet", "Create pet", &["pets"])),
            ..Default::default()
        },
    );
    paths.insert(
        "/pets/secret".to_string(),
        PathItem {
            get: Some(Operation {
                internal: true,
                ..operation("secretPets", "Secret pets", &["pets"])
            }),
            ..Default::default()
        },
    );
    paths.insert(
        "/users".to_string(),
        PathItem {
            get: Some(operation("listUsers", "List users", &["users"])),
            ..Default::default()
        },
    );
    paths.insert(
        "/admin".to_string(),
        PathItem {
            get: Some(operation("adminPanel", "Admin panel", &["admin"])),
            ..Default::default()
        },
    );
    paths.insert(
        "/health".to_string(),
        PathItem {
            get: Some(operation("health", "Health check", &[])),
            ..Default::default()
        },
    );

    let mut webhooks = IndexMap::new();
    webhooks.insert(
        "newPet".to_string(),
        PathItem {
            post: Some(operation("newPetHook", "New pet", &[])),
            ..Default::default()
        },
    );

    let mut schemas = IndexMap::new();
    schemas.insert(
        "Pet".to_string(),
        serde_json::json!({"type": "object", "properties": {"name": {"type": "string"}}}),
    );
    schemas.insert("User".to_string(), serde_json::json!({"type": "object"}));
    schemas.insert(
        "AuditLog".to_string(),
        serde_json::json!({"type": "object", "x-internal": true}),
    );

    let mut security_schemes = IndexMap::new();
    security_schemes.insert(
        "apiKey".to_string(),
        SecurityScheme {
            scheme_type: "apiKey".to_string(),
            location: Some("header".to_string()),
            name: Some("X-API-Key".to_string()),
            ..Default::default()
        },
    );
    security_schemes.insert(
        "bearer".to_string(),
        SecurityScheme {
            scheme_type: "http".to_string(),
            scheme: Some("bearer".to_string()),
            bearer_format: Some("JWT".to_string()),
            ..Default::default()
        },
    );
    security_schemes.insert(
        "oauth2".to_string(),
        SecurityScheme {
            scheme_type: "oauth2".to_string(),
            ..Default::default()
        },
    );

    OpenApiDocument {
        openapi: "3.1.0".to_string(),
        info: Info {
            title: "Pet Store".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        },
        servers: Some(vec![
            Server::new("/api/v1"),
            Server {
                description: Some("Production".to_string()),
                ..Server::new("https://api.example.com")
            },
        ]),
        paths,
        webhooks,
        components: Components {
            schemas,
            security_schemes,
        },
        tags: vec![
            Tag {
                display_name: Some("Pets".to_string()),
                ..Tag::named("pets")
            },
            Tag::named("users"),
            Tag {
                internal: true,
                ..Tag::named("admin")
            },
        ],
        security: Some(vec![requirement(&["apiKey"])]),
        ..Default::default()
    }
}

/// Creates a security requirement naming `schemes` with no scopes.
pub fn requirement(schemes: &[&str]) -> SecurityRequirement {
    schemes
        .iter()
        .map(|name| ((*name).to_string(), Vec::new()))
        .collect()
}

/// Creates a navigation tree with two groups sharing a tag.
///
/// ```text
/// document
/// ├── Core (group)
/// │   ├── users
/// │   │   └── GET /users
/// │   └── pets
/// ├── Extras (group)
/// │   └── pets
/// └── models
///     └── Pet
/// ```
pub fn grouped_tree() -> TraversedDocument {
    TraversedDocument {
        id: "doc".to_string(),
        name: "petstore".to_string(),
        title: "Pet Store".to_string(),
        children: vec![
            group(
                "Core",
                vec![
                    tag_entry(
                        "users",
                        vec![operation_entry(HttpMethod::Get, "/users", "List users")],
                    ),
                    tag_entry("pets", Vec::new()),
                ],
            ),
            group("Extras", vec![tag_entry("pets", Vec::new())]),
            TraversedEntry::Models(TraversedModels {
                id: "models".to_string(),
                name: "models".to_string(),
                title: "Models".to_string(),
                children: vec![TraversedEntry::Schema(TraversedSchema {
                    id: "model/pet".to_string(),
                    name: "Pet".to_string(),
                    title: "Pet".to_string(),
                    reference: "#/components/schemas/Pet".to_string(),
                })],
            }),
        ],
    }
}

/// Creates a tag node with id `tag/{name}`.
pub fn tag_entry(name: &str, children: Vec<TraversedEntry>) -> TraversedEntry {
    TraversedEntry::Tag(TraversedTag {
        id: format!("tag/{name}"),
        name: name.to_string(),
        title: name.to_string(),
        description: None,
        is_group: false,
        children,
    })
}

/// Creates a group node with id `group/{name}`.
pub fn group(name: &str, children: Vec<TraversedEntry>) -> TraversedEntry {
    TraversedEntry::Tag(TraversedTag {
        id: format!("group/{name}"),
        name: name.to_string(),
        title: name.to_string(),
        description: None,
        is_group: true,
        children,
    })
}

/// Creates an operation leaf.
pub fn operation_entry(method: HttpMethod, path: &str, title: &str) -> TraversedEntry {
    TraversedEntry::Operation(TraversedOperation {
        id: format!("{method}{path}"),
        title: title.to_string(),
        reference: format!("#/paths/{}/{method}", escape_pointer_segment(path)),
        method,
        path: path.to_string(),
        deprecated: false,
    })
}

fn operation(operation_id: &str, summary: &str, tags: &[&str]) -> Operation {
    Operation {
        operation_id: Some(operation_id.to_string()),
        summary: Some(summary.to_string()),
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        ..Default::default()
    }
}
