//! Entry point for the `swfind` pipeline.
//!
//! The binary stays thin: parse flags, resolve configuration, materialize
//! the workspace, then hand control to the stage dispatcher. The workspace
//! is only scrubbed after a fully successful run; any failure leaves it
//! populated for postmortem inspection.
use anyhow::Result;
use clap::Parser;

mod cleanup;
mod cli;
mod config;
mod external;
mod pipeline;
mod stage;
mod workspace;

use crate::cli::RootArgs;
use crate::external::external_stage_set;
use crate::pipeline::{Pipeline, RunSummary};
use crate::workspace::WorkspacePaths;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let config = config::resolve(&args);
    let paths = WorkspacePaths::new(config.workspace_root.clone());
    paths.materialize()?;
    if args.verbose {
        for (label, path) in paths.artifact_paths() {
            eprintln!("{label}: {}", path.display());
        }
    }

    let mut pipeline = Pipeline::new(external_stage_set(), &paths, &config);
    let outcome = pipeline.run();

    match &outcome {
        Ok(()) => cleanup::scrub_workspace(&paths, args.verbose),
        Err(_) => eprintln!(
            "note: workspace left at {} for inspection",
            paths.root().display()
        ),
    }

    if args.json {
        let summary = RunSummary::new(&config, pipeline.state());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    outcome
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
