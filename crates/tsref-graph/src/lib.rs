//! Project graph construction for Reference Manager
//!
//! Loads every declared project's manifest and configuration text
//! concurrently and assembles the read-only dependency graph the
//! synchronizer works from.

pub mod config;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod project;

pub use config::{ModuleResolution, TsProjectConfig};
pub use error::{Error, Result};
pub use graph::{OPT_OUT_MARKER, ProjectGraph};
pub use manifest::{ExportTarget, ExportsField, PackageManifest};
pub use project::Project;
