//! Ambient origin capability.
//!
//! A browser host knows the page origin; other hosts do not. Server
//! resolution reads the origin through [`OriginProvider`] so the same code
//! runs in both places: inject [`StaticOrigin`] from configuration, or
//! [`NoOrigin`] when there is nothing to fall back on.

/// Source of the ambient origin (`scheme://host[:port]`).
pub trait OriginProvider: Send + Sync {
    /// The current origin, if one is available.
    fn origin(&self) -> Option<&str>;
}

/// No ambient origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOrigin;

impl OriginProvider for NoOrigin {
    fn origin(&self) -> Option<&str> {
        None
    }
}

/// A fixed origin, typically taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticOrigin {
    origin: String,
}

impl StaticOrigin {
    /// Use `origin` as given. A trailing `/` is dropped.
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        while origin.ends_with('/') {
            origin.pop();
        }
        Self { origin }
    }

    /// Derive the origin from any absolute URL.
    ///
    /// Returns `None` for relative or unparseable input and for URLs without
    /// a tuple origin (such as `file:` or `data:`).
    pub fn from_url(url: &str) -> Option<Self> {
        crate::resolve::document_origin(url).map(|origin| Self { origin })
    }
}

impl OriginProvider for StaticOrigin {
    fn origin(&self) -> Option<&str> {
        (!self.origin.is_empty()).then_some(self.origin.as_str())
    }
}
