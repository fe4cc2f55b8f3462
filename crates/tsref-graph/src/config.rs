//! Typed view of a project configuration
//!
//! Extracted from the locator's normalized value form rather than
//! deserialized strictly: configuration files carry many fields this tool
//! never reads, and a missing or oddly shaped `compilerOptions` only
//! disables the options that depend on it.

use serde_json::Value;

/// Module-resolution mode. Only the exact `"node"` value enables the
/// self-wildcard path entry; everything else (including absence) is
/// insignificant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleResolution {
    Node,
    #[default]
    Other,
}

impl ModuleResolution {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("node") => Self::Node,
            _ => Self::Other,
        }
    }
}

/// The configuration fields consumed when building the project graph.
#[derive(Debug, Clone, Default)]
pub struct TsProjectConfig {
    pub out_dir: Option<String>,
    pub module_resolution: ModuleResolution,
}

impl TsProjectConfig {
    /// Extract the consumed fields from a normalized configuration value.
    pub fn from_normalized(normalized: &Value) -> Self {
        let compiler_options = normalized.get("compilerOptions");
        let out_dir = compiler_options
            .and_then(|options| options.get("outDir"))
            .and_then(Value::as_str)
            .map(String::from);
        let module_resolution = ModuleResolution::from_value(
            compiler_options
                .and_then(|options| options.get("moduleResolution"))
                .and_then(Value::as_str),
        );
        Self {
            out_dir,
            module_resolution,
        }
    }
}

/// Extract the declared project directories from a root configuration's
/// `references` list. Returns `None` when the list is missing or any entry
/// lacks a string `path` (the project set cannot be trusted partially).
pub fn root_reference_paths(normalized: &Value) -> Option<Vec<String>> {
    normalized
        .get("references")?
        .as_array()?
        .iter()
        .map(|entry| {
            entry
                .get("path")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .collect()
}
