//! Active security resolution.
//!
//! Given the security requirements that apply to an operation and the
//! current selection, work out which schemes are active:
//!
//! 1. The requirement at `selectedIndex`, if the operation accepts it.
//! 2. Otherwise the first selected requirement the operation accepts.
//! 3. Otherwise, when operation security should be surfaced, the operation's
//!    first declared requirement.
//! 4. Otherwise nothing.
//!
//! Requirements are compared by the set of scheme names they contain; scopes
//! and declaration order do not matter.

use std::collections::HashSet;

use indexmap::IndexMap;
use meridian_core::{
    OpenApiDocument, Operation, SecurityRequirement, SecurityScheme, SelectedSecurity,
};
use tracing::{debug, trace};

/// An active scheme: its name and its definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveScheme<'a> {
    /// Key under `components.securitySchemes`.
    pub name: &'a str,
    /// The scheme definition.
    pub scheme: &'a SecurityScheme,
}

/// Identity of a requirement: its scheme names, sorted and comma-joined.
///
/// `{oauth2, apiKey}` and `{apiKey, oauth2}` share the key `apiKey,oauth2`.
pub fn requirement_key(requirement: &SecurityRequirement) -> String {
    let mut names: Vec<&str> = requirement.keys().map(String::as_str).collect();
    names.sort_unstable();
    names.join(",")
}

/// Resolve the schemes currently active for an operation.
///
/// `requirements` is the already-resolved list (operation security, or the
/// document's when the operation declares none); see
/// [`effective_requirements`]. Scheme names missing from `schemes` are
/// skipped.
pub fn resolve_active_security<'a>(
    requirements: &'a [SecurityRequirement],
    selected: Option<&'a SelectedSecurity>,
    schemes: &'a IndexMap<String, SecurityScheme>,
    should_set_operation_security: bool,
) -> Vec<ActiveScheme<'a>> {
    let keys: HashSet<String> = requirements.iter().map(requirement_key).collect();
    let accepted =
        |requirement: &&SecurityRequirement| keys.contains(&requirement_key(requirement));

    let requirement = if let Some(requirement) = selected
        .and_then(SelectedSecurity::at_selected_index)
        .filter(accepted)
    {
        trace!(key = %requirement_key(requirement), "Selected index matched");
        Some(requirement)
    } else if let Some(requirement) =
        selected.and_then(|selected| selected.selected_schemes.iter().find(accepted))
    {
        trace!(key = %requirement_key(requirement), "Selected scheme matched");
        Some(requirement)
    } else {
        fallback_requirement(requirements, should_set_operation_security)
    };

    let active = requirement.map_or_else(Vec::new, |requirement| {
        materialize(requirement, schemes)
    });
    debug!(
        requirements = requirements.len(),
        active = active.len(),
        "Resolved active security"
    );
    active
}

/// Requirement shown when no selection matches.
///
/// Surfaces the first declared requirement so an operation visibly demands
/// auth even before the user picks a scheme. This is a display policy, not
/// OpenAPI semantics.
pub fn fallback_requirement(
    requirements: &[SecurityRequirement],
    should_set_operation_security: bool,
) -> Option<&SecurityRequirement> {
    if !should_set_operation_security {
        return None;
    }
    let first = requirements.first();
    if let Some(requirement) = first {
        trace!(key = %requirement_key(requirement), "Falling back to first requirement");
    }
    first
}

fn materialize<'a>(
    requirement: &'a SecurityRequirement,
    schemes: &'a IndexMap<String, SecurityScheme>,
) -> Vec<ActiveScheme<'a>> {
    requirement
        .keys()
        .filter_map(|name| match schemes.get_key_value(name) {
            Some((name, scheme)) => Some(ActiveScheme {
                name: name.as_str(),
                scheme,
            }),
            None => {
                trace!(scheme = %name, "Unknown security scheme");
                None
            }
        })
        .collect()
}

/// Requirements that apply to `operation`.
///
/// An operation's own `security` wins, including an explicit empty list.
/// Otherwise the document's `security` applies. Otherwise nothing.
pub fn effective_requirements<'a>(
    document: &'a OpenApiDocument,
    operation: Option<&'a Operation>,
) -> &'a [SecurityRequirement] {
    operation
        .and_then(|operation| operation.security.as_deref())
        .or(document.security.as_deref())
        .unwrap_or_default()
}

/// Active schemes for `operation` within `document`.
///
/// Uses the operation's own selection when it has one, else the document's,
/// and honours the document's `x-scalar-set-operation-security` flag.
pub fn filter_selected_security<'a>(
    document: &'a OpenApiDocument,
    operation: Option<&'a Operation>,
) -> Vec<ActiveScheme<'a>> {
    let selected = operation
        .and_then(|operation| operation.selected_security.as_ref())
        .or(document.selected_security.as_ref());

    resolve_active_security(
        effective_requirements(document, operation),
        selected,
        &document.components.security_schemes,
        document.set_operation_security,
    )
}
