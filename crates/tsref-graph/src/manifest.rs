//! package.json data model
//!
//! Only the fields the synchronizer consumes are modeled: the package
//! name, the dependency name set, and the export map's `types` targets.
//! Manifests are strict JSON; a malformed manifest fails the whole run.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The manifest fields consumed when building the project graph.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub exports: Option<ExportsField>,
}

impl PackageManifest {
    /// Parse a manifest from strict JSON text.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Dependency names, sorted and de-duplicated; versions are ignored.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies.keys().cloned().collect()
    }

    /// The export map, when the `exports` field has the map form.
    pub fn export_map(&self) -> Option<&IndexMap<String, ExportTarget>> {
        match &self.exports {
            Some(ExportsField::Map(map)) => Some(map),
            _ => None,
        }
    }
}

/// The `exports` field.
///
/// Entry order matters (generated path entries follow declaration order),
/// so the map form uses `IndexMap`. Shorthand forms such as a bare string
/// target carry no type-declaration information and are kept only so the
/// manifest still parses.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExportsField {
    Map(IndexMap<String, ExportTarget>),
    Other(serde_json::Value),
}

/// One export target. Only object targets with a `types` condition
/// contribute generated path entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExportTarget {
    Conditions(ExportConditions),
    Other(serde_json::Value),
}

impl ExportTarget {
    /// The declaration-file pattern, when present.
    pub fn types(&self) -> Option<&str> {
        match self {
            Self::Conditions(conditions) => conditions.types.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// The conditions object of an export target.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConditions {
    #[serde(default)]
    pub types: Option<String>,
}
