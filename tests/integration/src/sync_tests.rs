//! End-to-end tests for the synchronizer
//!
//! These exercise the complete flow over real temp trees: graph load,
//! synthesis, splicing, and write-back.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use tsref_fs::PortablePath;
use tsref_graph::OPT_OUT_MARKER;
use tsref_sync::{SyncEngine, SyncOptions};

const APP_TSCONFIG: &str = "{\n\t\"compilerOptions\": {\n\t\t\"outDir\": \"dist\",\n\t\t\"paths\": {},\n\t},\n\t\"references\": [],\n}\n";

const LIB_TSCONFIG: &str = "{\n\t\"compilerOptions\": {\n\t\t\"outDir\": \"dist\",\n\t\t\"paths\": {},\n\t},\n\t\"references\": [],\n}\n";

const SHARED_TSCONFIG: &str = "{\n\t\"compilerOptions\": {\n\t\t\"moduleResolution\": \"node\",\n\t\t\"paths\": {},\n\t},\n\t\"references\": [],\n}\n";

/// Set up the worked example: `app` depends on `lib` (exported types with
/// an outDir) and `shared` (no export map, node resolution).
fn setup_example(root: &Path) {
    fs::write(
        root.join("tsconfig.json"),
        "{\n\t\"references\": [\n\t\t{ \"path\": \"packages/app\" },\n\t\t{ \"path\": \"packages/lib\" },\n\t\t{ \"path\": \"packages/shared\" },\n\t],\n}\n",
    )
    .unwrap();

    write_project(
        root,
        "packages/app",
        r#"{ "name": "app", "dependencies": { "lib": "workspace:*", "shared": "workspace:*" } }"#,
        APP_TSCONFIG,
    );
    write_project(
        root,
        "packages/lib",
        r#"{ "name": "lib", "exports": { "./": { "types": "./dist/index.d.ts" } } }"#,
        LIB_TSCONFIG,
    );
    write_project(
        root,
        "packages/shared",
        r#"{ "name": "shared" }"#,
        SHARED_TSCONFIG,
    );
}

fn write_project(root: &Path, dir: &str, package_json: &str, tsconfig: &str) {
    let project_dir = root.join(dir);
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("package.json"), package_json).unwrap();
    fs::write(project_dir.join("tsconfig.json"), tsconfig).unwrap();
}

async fn sync(root: &Path) -> tsref_sync::SyncReport {
    let engine = SyncEngine::load(PortablePath::new(root)).await.unwrap();
    engine.run(SyncOptions::default()).await
}

#[tokio::test]
async fn worked_example_produces_expected_configuration() {
    let temp = TempDir::new().unwrap();
    setup_example(temp.path());

    let report = sync(temp.path()).await;
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());

    let app = fs::read_to_string(temp.path().join("packages/app/tsconfig.json")).unwrap();
    assert_eq!(
        app,
        "{\n\
         \t\"compilerOptions\": {\n\
         \t\t\"outDir\": \"dist\",\n\
         \t\t// vv Generated dependencies, do not modify vv\n\
         \t\t\"paths\": {\n\
         \t\t\t\"lib/\": [ \"../lib/index.ts\" ],\n\
         \t\t},\n\
         \t\t// ^^ Generated dependencies, do not modify ^^\n\
         \t},\n\
         \t// vv Generated dependencies, do not modify vv\n\
         \t\"references\": [\n\
         \t\t{ \"path\": \"../lib\" },\n\
         \t\t{ \"path\": \"../shared\" },\n\
         \t],\n\
         \t// ^^ Generated dependencies, do not modify ^^\n\
         }\n"
    );
}

#[tokio::test]
async fn self_wildcard_entry_only_for_node_resolution_project() {
    let temp = TempDir::new().unwrap();
    setup_example(temp.path());

    sync(temp.path()).await;

    let shared = fs::read_to_string(temp.path().join("packages/shared/tsconfig.json")).unwrap();
    assert!(shared.contains("\"shared/*\": [ \"./*.ts\", \"./*/index.ts\" ],"));

    // `app` must not receive a wildcard entry for `shared`.
    let app = fs::read_to_string(temp.path().join("packages/app/tsconfig.json")).unwrap();
    assert!(!app.contains("shared/*"));
}

#[tokio::test]
async fn second_run_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    setup_example(temp.path());

    let first = sync(temp.path()).await;
    assert!(first.has_changes());

    let snapshot: Vec<(String, String)> = ["app", "lib", "shared"]
        .iter()
        .map(|name| {
            let path = temp
                .path()
                .join(format!("packages/{}/tsconfig.json", name));
            (name.to_string(), fs::read_to_string(path).unwrap())
        })
        .collect();

    let second = sync(temp.path()).await;
    assert!(!second.has_changes());
    assert!(second.errors.is_empty());

    for (name, before) in snapshot {
        let after = fs::read_to_string(
            temp.path()
                .join(format!("packages/{}/tsconfig.json", name)),
        )
        .unwrap();
        assert_eq!(before, after, "{} drifted on second run", name);
    }
}

#[tokio::test]
async fn hand_authored_content_survives() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tsconfig.json"),
        r#"{ "references": [{ "path": "app" }, { "path": "lib" }] }"#,
    )
    .unwrap();
    write_project(
        temp.path(),
        "app",
        r#"{ "name": "app", "dependencies": { "lib": "*" } }"#,
        "{\n\t// hand-written note\n\t\"compilerOptions\": {\n\t\t\"paths\": {},\n\t\t\"strict\": true, // keep strict\n\t},\n\t\"references\": [],\n\t\"files\": [\"custom.ts\"],\n}\n",
    );
    write_project(
        temp.path(),
        "lib",
        r#"{ "name": "lib", "exports": { "./": { "types": "./out/main.d.ts" } } }"#,
        "{\n\t\"compilerOptions\": {\n\t\t\"outDir\": \"out\",\n\t\t\"paths\": {},\n\t},\n\t\"references\": [],\n}\n",
    );

    sync(temp.path()).await;

    let app = fs::read_to_string(temp.path().join("app/tsconfig.json")).unwrap();
    assert!(app.contains("// hand-written note"));
    assert!(app.contains("\"strict\": true, // keep strict"));
    assert!(app.contains("\"files\": [\"custom.ts\"],"));
    assert!(app.contains("\"lib/\": [ \"../lib/main.ts\" ],"));
}

#[tokio::test]
async fn opted_out_project_is_never_modified() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tsconfig.json"),
        r#"{ "references": [{ "path": "app" }, { "path": "lib" }] }"#,
    )
    .unwrap();
    let opted_out = "{\n\t// @no-automatic-paths\n\t\"compilerOptions\": {\n\t\t\"paths\": {},\n\t},\n\t\"references\": [],\n}\n";
    write_project(
        temp.path(),
        "app",
        r#"{ "name": "app", "dependencies": { "lib": "*" } }"#,
        opted_out,
    );
    write_project(
        temp.path(),
        "lib",
        r#"{ "name": "lib", "exports": { "./": { "types": "./dist/index.d.ts" } } }"#,
        LIB_TSCONFIG,
    );

    let report = sync(temp.path()).await;
    // Opt-out is silent: no warning, no action for `app`.
    assert!(report.warnings.is_empty());

    temp.child("app/tsconfig.json")
        .assert(predicate::str::contains(OPT_OUT_MARKER));
    temp.child("app/tsconfig.json").assert(opted_out);
}

#[tokio::test]
async fn external_dependencies_never_produce_entries() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tsconfig.json"),
        r#"{ "references": [{ "path": "app" }, { "path": "lib" }] }"#,
    )
    .unwrap();
    write_project(
        temp.path(),
        "app",
        r#"{ "name": "app", "dependencies": { "left-pad": "^1.3.0", "lib": "*" } }"#,
        APP_TSCONFIG,
    );
    write_project(
        temp.path(),
        "lib",
        r#"{ "name": "lib", "exports": { "./": { "types": "./dist/index.d.ts" } } }"#,
        LIB_TSCONFIG,
    );

    sync(temp.path()).await;

    let app = fs::read_to_string(temp.path().join("app/tsconfig.json")).unwrap();
    assert!(!app.contains("left-pad"));
    assert!(app.contains("{ \"path\": \"../lib\" },"));
}

#[tokio::test]
async fn missing_edit_points_warn_once_and_write_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("tsconfig.json"),
        r#"{ "references": [{ "path": "app" }, { "path": "lib" }] }"#,
    )
    .unwrap();
    let no_edit_points = "{\n\t\"compilerOptions\": {\n\t\t\"strict\": true,\n\t},\n}\n";
    write_project(
        temp.path(),
        "app",
        r#"{ "name": "app", "dependencies": { "lib": "*" } }"#,
        no_edit_points,
    );
    write_project(temp.path(), "lib", r#"{ "name": "lib" }"#, no_edit_points);

    let report = sync(temp.path()).await;

    // Exactly one warning: `app` has a graph-internal dependency. `lib`
    // has no dependencies, so its missing edit points are fine.
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("app"));
    assert!(report.actions.is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("app/tsconfig.json")).unwrap(),
        no_edit_points
    );
}

#[tokio::test]
async fn check_mode_reports_drift_without_writing() {
    let temp = TempDir::new().unwrap();
    setup_example(temp.path());

    let engine = SyncEngine::load(PortablePath::new(temp.path()))
        .await
        .unwrap();
    assert_eq!(engine.graph().len(), 3);
    let report = engine
        .run(SyncOptions {
            dry_run: false,
            check: true,
        })
        .await;

    assert!(report.has_changes());
    assert!(!report.diffs.is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("packages/app/tsconfig.json")).unwrap(),
        APP_TSCONFIG
    );
}
