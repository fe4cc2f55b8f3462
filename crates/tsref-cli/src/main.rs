//! Reference Manager CLI
//!
//! Keeps `tsconfig.json` path mappings and project references in sync
//! with the package dependency graph of a multi-package tree.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::Result;
use tsref_fs::PortablePath;
use tsref_sync::{SyncEngine, SyncOptions, SyncReport};

fn main() {
    match run() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    // All concurrency is overlapped file I/O; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let options = SyncOptions {
        dry_run: cli.dry_run,
        check: cli.check,
    };
    let report = runtime.block_on(async {
        let engine = SyncEngine::load(PortablePath::new(&cli.root)).await?;
        Ok::<SyncReport, tsref_sync::Error>(engine.run(options).await)
    })?;

    print_report(&report, options);

    let drifted = cli.check && report.has_changes();
    Ok(if report.errors.is_empty() && !drifted {
        0
    } else {
        1
    })
}

fn print_report(report: &SyncReport, options: SyncOptions) {
    for action in &report.actions {
        println!("{} {}", "sync".green().bold(), action);
    }
    if options.dry_run || options.check {
        for (_, diff) in &report.diffs {
            print!("{}", diff.as_str().dimmed());
        }
    }
    for warning in &report.warnings {
        eprintln!("{}: {}", "warning".yellow().bold(), warning);
    }
    for error in &report.errors {
        eprintln!("{}: {}", "error".red().bold(), error);
    }
}
