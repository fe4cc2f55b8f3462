//! Project graph construction
//!
//! Phase 1 of a run: every declared project's manifest and configuration
//! are read concurrently, parsed, and assembled into a single read-only
//! graph keyed by manifest name. Any read or parse failure aborts the
//! whole load.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use tracing::debug;

use tsref_fs::{PortablePath, io};
use tsref_locate::Document;

use crate::config::{TsProjectConfig, root_reference_paths};
use crate::error::{Error, Result};
use crate::manifest::PackageManifest;
use crate::project::Project;

/// Literal marker disabling automatic editing for a project when it
/// appears anywhere in the project's configuration text.
pub const OPT_OUT_MARKER: &str = "@no-automatic-paths";

/// The dependency graph over all declared projects.
///
/// Built once per run; read-only afterwards. Opted-out projects are still
/// members, since siblings may depend on them.
#[derive(Debug)]
pub struct ProjectGraph {
    projects: BTreeMap<String, Project>,
}

impl ProjectGraph {
    /// Load the graph for the tree rooted at `root`.
    ///
    /// Reads `<root>/tsconfig.json` for the declared project list, then
    /// fans out all per-project reads concurrently and waits for every one
    /// before returning, so the graph is a single consistent snapshot.
    pub async fn load(root: &PortablePath) -> Result<Self> {
        let root_config_path = root.join("tsconfig.json");
        let root_text = io::read_text(&root_config_path).await?;
        let root_doc = Document::parse(root_text)
            .map_err(|e| Error::config(root_config_path.to_native(), e))?;
        let project_dirs =
            root_reference_paths(&root_doc.normalize()).ok_or_else(|| Error::RootReferences {
                path: root_config_path.to_native(),
            })?;

        let projects = try_join_all(
            project_dirs
                .iter()
                .map(|dir| load_project(root, PortablePath::new(dir))),
        )
        .await?;

        let mut map = BTreeMap::new();
        for project in projects {
            map.insert(project.name.clone(), project);
        }
        debug!(projects = map.len(), "project graph loaded");
        Ok(Self { projects: map })
    }

    /// Assemble a graph from already-loaded project records.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            projects: projects
                .into_iter()
                .map(|project| (project.name.clone(), project))
                .collect(),
        }
    }

    /// Look up a project by manifest name.
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// Whether a name is a graph member.
    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    /// All projects in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Load one project: both files concurrently, then parse and assemble.
async fn load_project(root: &PortablePath, dir: PortablePath) -> Result<Project> {
    let manifest_path = root.join(dir.as_str()).join("package.json");
    let config_path = root.join(dir.as_str()).join("tsconfig.json");

    let (manifest_text, config_text) = tokio::try_join!(
        io::read_text(&manifest_path),
        io::read_text(&config_path),
    )?;

    let manifest = PackageManifest::parse(&manifest_text)
        .map_err(|e| Error::manifest(manifest_path.to_native(), e))?;
    let document =
        Document::parse(config_text).map_err(|e| Error::config(config_path.to_native(), e))?;

    let config = TsProjectConfig::from_normalized(&document.normalize());
    let spans = document.edit_spans();
    let raw_config = document.source().to_string();
    let opted_out = raw_config.contains(OPT_OUT_MARKER);

    debug!(
        name = %manifest.name,
        dir = %dir,
        dependencies = manifest.dependencies.len(),
        editable = spans.is_some(),
        opted_out,
        "loaded project"
    );

    Ok(Project {
        name: manifest.name.clone(),
        dir,
        dependencies: manifest.dependency_names(),
        exports: manifest.exports,
        out_dir: config.out_dir,
        module_resolution: config.module_resolution,
        raw_config,
        opted_out,
        spans,
    })
}
