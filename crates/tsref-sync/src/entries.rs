//! Generated content synthesis
//!
//! Pure functions of the graph and one project; both lists are fully
//! deterministic, so repeated runs over unchanged inputs produce
//! byte-identical output.

use tsref_fs::relative_between;
use tsref_graph::{ModuleResolution, Project, ProjectGraph};

/// One path-remapping entry: a module specifier pattern and its ordered
/// candidate locations. Candidate order matters; the consuming resolver
/// tries them first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub from: String,
    pub to: Vec<String>,
}

/// One reference entry: the relative path to a sibling project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub path: String,
}

/// Synthesize the path entries for one project.
///
/// Dependencies are visited alphabetically with the project's own name
/// appended last (the self entry is considered even when the project does
/// not list itself as a dependency). Names outside the graph contribute
/// nothing.
pub fn synthesize_paths(graph: &ProjectGraph, project: &Project) -> Vec<PathEntry> {
    let mut order: Vec<&str> = project
        .dependencies
        .iter()
        .map(String::as_str)
        .filter(|dependency| *dependency != project.name)
        .collect();
    order.push(&project.name);

    let mut entries = Vec::new();
    for dependency in order {
        let Some(record) = graph.get(dependency) else {
            continue;
        };
        if record.exports.is_some() {
            let Some(exports) = record.export_map() else {
                continue;
            };
            for (specifier, target) in exports {
                let Some(types) = target.types() else {
                    continue;
                };
                let Some(subpath) = specifier.strip_prefix("./") else {
                    continue;
                };
                let pattern = rewrite_declaration_pattern(types, record.out_dir.as_deref());
                if pattern.is_empty() {
                    continue;
                }
                let base = match relative_between(&project.dir, &record.dir) {
                    rel if rel.is_empty() => ".".to_string(),
                    rel => rel,
                };
                entries.push(PathEntry {
                    from: format!("{}/{}", dependency, subpath),
                    to: vec![format!("{}/{}", base, pattern)],
                });
            }
        } else if record.module_resolution == ModuleResolution::Node && dependency == project.name {
            // A project re-exporting itself by convention; the two
            // candidates are tried in this order.
            entries.push(PathEntry {
                from: format!("{}/*", dependency),
                to: vec!["./*.ts".to_string(), "./*/index.ts".to_string()],
            });
        }
    }
    entries
}

/// Synthesize the reference entries for one project: every graph-member
/// dependency except itself, alphabetically.
pub fn synthesize_references(graph: &ProjectGraph, project: &Project) -> Vec<ReferenceEntry> {
    project
        .dependencies
        .iter()
        .filter(|dependency| **dependency != project.name)
        .filter_map(|dependency| graph.get(dependency))
        .map(|record| ReferenceEntry {
            path: relative_between(&project.dir, &record.dir),
        })
        .collect()
}

/// Turn a declaration-file pattern into the matching source pattern:
/// strip the first occurrence of the `./{outDir}/` build prefix and
/// rewrite the `.d.ts` suffix to `.ts`.
fn rewrite_declaration_pattern(types: &str, out_dir: Option<&str>) -> String {
    let stripped = match out_dir {
        Some(out_dir) => types.replacen(&format!("./{}/", out_dir), "", 1),
        None => types.to_string(),
    };
    match stripped.strip_suffix(".d.ts") {
        Some(stem) => format!("{}.ts", stem),
        None => stripped,
    }
}
