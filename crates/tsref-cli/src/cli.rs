//! Command-line interface definition

use clap::Parser;

/// Keep tsconfig path mappings and project references in sync with the
/// package dependency graph.
#[derive(Debug, Parser)]
#[command(name = "tsref", version, about)]
pub struct Cli {
    /// Root of the multi-package tree (the directory holding the
    /// top-level tsconfig.json)
    #[arg(default_value = ".")]
    pub root: String,

    /// Simulate changes without writing, printing a diff per file
    #[arg(long)]
    pub dry_run: bool,

    /// Report drift without writing; exits nonzero if anything would change
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
