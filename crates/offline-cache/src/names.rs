//! Version-stamped cache namespace names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two logical namespaces a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    /// Fixed assets known at deployment time (the application shell).
    Static,
    /// Pages and responses discovered at runtime.
    Dynamic,
}

impl NamespaceKind {
    /// Short name used in the string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A versioned cache namespace name, e.g. `static-v3`.
///
/// The version is baked into the name: bumping it addresses a new,
/// empty namespace and leaves the old one eligible for eviction. The
/// string form doubles as the on-storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheName {
    kind: NamespaceKind,
    version: String,
}

impl CacheName {
    /// Create a namespace name for the given kind and version.
    pub fn new(kind: NamespaceKind, version: impl Into<String>) -> Self {
        Self {
            kind,
            version: version.into(),
        }
    }

    /// The static namespace name for a version.
    pub fn static_for(version: impl Into<String>) -> Self {
        Self::new(NamespaceKind::Static, version)
    }

    /// The dynamic namespace name for a version.
    pub fn dynamic_for(version: impl Into<String>) -> Self {
        Self::new(NamespaceKind::Dynamic, version)
    }

    /// Parse a name of the form `static-<version>` or `dynamic-<version>`.
    pub fn parse(name: &str) -> Option<Self> {
        let (prefix, version) = name.split_once('-')?;
        let kind = match prefix {
            "static" => NamespaceKind::Static,
            "dynamic" => NamespaceKind::Dynamic,
            _ => return None,
        };
        if version.is_empty() {
            return None;
        }
        Some(Self::new(kind, version))
    }

    /// Namespace kind.
    pub fn kind(&self) -> NamespaceKind {
        self.kind
    }

    /// Version stamped into the name.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether this name equals the given string form.
    pub fn matches(&self, name: &str) -> bool {
        match name.split_once('-') {
            Some((prefix, version)) => prefix == self.kind.as_str() && version == self.version,
            None => false,
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.version)
    }
}

/// The live namespace pair for the current deployment version.
///
/// Activation deletes every namespace this set does not retain, which
/// bounds live namespaces at two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSet {
    static_name: CacheName,
    dynamic_name: CacheName,
}

impl NamespaceSet {
    /// Namespace pair for a deployment version.
    pub fn for_version(version: &str) -> Self {
        Self {
            static_name: CacheName::static_for(version),
            dynamic_name: CacheName::dynamic_for(version),
        }
    }

    /// The static namespace name.
    pub fn static_name(&self) -> &CacheName {
        &self.static_name
    }

    /// The dynamic namespace name.
    pub fn dynamic_name(&self) -> &CacheName {
        &self.dynamic_name
    }

    /// Whether a namespace name survives activation under this set.
    pub fn retains(&self, name: &str) -> bool {
        self.static_name.matches(name) || self.dynamic_name.matches(name)
    }
}
