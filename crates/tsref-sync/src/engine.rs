//! Sync engine
//!
//! Phase 2 of a run: for every graph member, synthesize the generated
//! blocks, splice them into the configuration text, and write back only
//! when the result differs from what is on disk. Planning is pure; the
//! writes are issued concurrently afterwards and target disjoint files.

use futures::future::join_all;
use similar::TextDiff;
use tracing::{debug, warn};

use tsref_fs::{PortablePath, io};
use tsref_graph::{Project, ProjectGraph};
use tsref_locate::SpanPair;

use crate::entries::{synthesize_paths, synthesize_references};
use crate::error::Result;
use crate::splice::{SpliceOp, apply_splices, render_paths_block, render_references_block};

/// Options for a sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Simulate changes without writing; actions are prefixed with
    /// "[dry-run] Would ...".
    pub dry_run: bool,
    /// Report drift without writing; pending changes land in the report's
    /// diffs so a CI caller can fail on them.
    pub check: bool,
}

impl SyncOptions {
    fn writes_suppressed(self) -> bool {
        self.dry_run || self.check
    }
}

/// Report from a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Actions taken (or, with writes suppressed, that would be taken).
    pub actions: Vec<String>,
    /// One line per project with graph-internal dependencies but no
    /// locatable edit points.
    pub warnings: Vec<String>,
    /// Per-project write failures; these do not stop other projects.
    pub errors: Vec<String>,
    /// Unified diffs of pending changes by configuration path, populated
    /// when writes are suppressed.
    pub diffs: Vec<(String, String)>,
}

impl SyncReport {
    /// Whether anything changed, or would change.
    pub fn has_changes(&self) -> bool {
        !self.actions.is_empty()
    }
}

enum ProjectPlan {
    /// Opt-out marker present; leave the file alone silently.
    OptedOut,
    /// Editable and already up to date.
    Unchanged,
    /// Editable and out of date; carries the full replacement text.
    Update(String),
    /// No edit points, but dependencies inside the graph: warn.
    MissingSpans,
    /// No edit points and nothing to warn about.
    Untouched,
}

/// Engine for one synchronization run over a loaded project graph.
pub struct SyncEngine {
    root: PortablePath,
    graph: ProjectGraph,
}

impl SyncEngine {
    /// Build the graph for the tree rooted at `root` (phase 1).
    ///
    /// # Errors
    ///
    /// Any unreadable or unparsable manifest/configuration fails the whole
    /// load; the graph cannot be trusted partially.
    pub async fn load(root: PortablePath) -> Result<Self> {
        let graph = ProjectGraph::load(&root).await?;
        Ok(Self { root, graph })
    }

    /// The loaded graph.
    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    /// Run the mutation phase.
    ///
    /// Processing order is not observable: plans depend only on the
    /// read-only graph, and writes go to disjoint files. A failed write is
    /// recorded in the report and does not affect other projects.
    pub async fn run(&self, options: SyncOptions) -> SyncReport {
        let mut report = SyncReport::default();
        let mut pending: Vec<(&Project, PortablePath, String)> = Vec::new();

        for project in self.graph.iter() {
            let config_path = project.dir.join("tsconfig.json");
            match self.plan_project(project) {
                ProjectPlan::OptedOut => {
                    debug!(name = %project.name, "opted out, skipping");
                }
                ProjectPlan::Unchanged => {
                    debug!(name = %project.name, "already up to date");
                }
                ProjectPlan::Update(new_text) => {
                    if options.writes_suppressed() {
                        let prefix = if options.dry_run {
                            "[dry-run] Would update"
                        } else {
                            "Out of date:"
                        };
                        report.actions.push(format!("{} {}", prefix, config_path));
                        report.diffs.push((
                            config_path.as_str().to_string(),
                            unified_diff(&project.raw_config, &new_text, config_path.as_str()),
                        ));
                    } else {
                        pending.push((project, self.root.join(config_path.as_str()), new_text));
                    }
                }
                ProjectPlan::MissingSpans => {
                    let message = format!(
                        "{} has project dependencies but no \"paths\" or \"references\" in tsconfig.json",
                        project.dir
                    );
                    warn!(name = %project.name, "{}", message);
                    report.warnings.push(message);
                }
                ProjectPlan::Untouched => {}
            }
        }

        let results = join_all(
            pending
                .iter()
                .map(|(_, path, text)| io::write_text_atomic(path, text)),
        )
        .await;
        for ((project, _, _), result) in pending.iter().zip(results) {
            let config_path = project.dir.join("tsconfig.json");
            match result {
                Ok(()) => report.actions.push(format!("Updated {}", config_path)),
                Err(e) => report
                    .errors
                    .push(format!("Failed to write {}: {}", config_path, e)),
            }
        }

        report
    }

    fn plan_project(&self, project: &Project) -> ProjectPlan {
        if project.opted_out {
            return ProjectPlan::OptedOut;
        }
        match project.spans {
            Some(spans) => {
                let new_text = self.render_project(project, spans);
                if new_text == project.raw_config {
                    ProjectPlan::Unchanged
                } else {
                    ProjectPlan::Update(new_text)
                }
            }
            None => {
                if project
                    .dependencies
                    .iter()
                    .any(|dependency| self.graph.contains(dependency))
                {
                    ProjectPlan::MissingSpans
                } else {
                    ProjectPlan::Untouched
                }
            }
        }
    }

    /// Synthesize both blocks and splice them into the original text.
    fn render_project(&self, project: &Project, spans: SpanPair) -> String {
        let paths = synthesize_paths(&self.graph, project);
        let references = synthesize_references(&self.graph, project);
        let ops = vec![
            SpliceOp {
                span: spans.paths,
                replacement: render_paths_block(&paths),
            },
            SpliceOp {
                span: spans.references,
                replacement: render_references_block(&references),
            },
        ];
        apply_splices(&project.raw_config, ops)
    }
}

fn unified_diff(old: &str, new: &str, path: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}
