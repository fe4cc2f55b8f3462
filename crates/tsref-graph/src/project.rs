//! Project records

use indexmap::IndexMap;
use tsref_fs::PortablePath;
use tsref_locate::SpanPair;

use crate::config::ModuleResolution;
use crate::manifest::{ExportTarget, ExportsField};

/// One unit of the multi-package tree, assembled from its manifest and
/// configuration file during phase 1. Immutable afterwards.
#[derive(Debug, Clone)]
pub struct Project {
    /// Manifest name; the graph key.
    pub name: String,
    /// Directory as declared in the root configuration, relative to the
    /// repository root. Generated entries are computed between these.
    pub dir: PortablePath,
    /// Sorted, de-duplicated manifest dependency names.
    pub dependencies: Vec<String>,
    /// The manifest's `exports` field, kept in its declared form. A
    /// present-but-unusable field (e.g. a bare string target) still
    /// suppresses the wildcard fallback, exactly as a usable map does.
    pub exports: Option<ExportsField>,
    /// `compilerOptions.outDir`, used to strip build prefixes from
    /// declaration patterns.
    pub out_dir: Option<String>,
    /// `compilerOptions.moduleResolution`.
    pub module_resolution: ModuleResolution,
    /// The configuration file's raw text, byte for byte.
    pub raw_config: String,
    /// Whether the opt-out marker appears in the configuration text.
    pub opted_out: bool,
    /// Spans of the two editable regions, when both were located.
    pub spans: Option<SpanPair>,
}

impl Project {
    /// The export map, when the `exports` field has the map form.
    pub fn export_map(&self) -> Option<&IndexMap<String, ExportTarget>> {
        match &self.exports {
            Some(ExportsField::Map(map)) => Some(map),
            _ => None,
        }
    }
}
