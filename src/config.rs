//! Resolved run configuration.
//!
//! Resolution is pure: defaults are applied and nothing on disk is checked.
//! A missing input file or engine installation surfaces later as a stage
//! failure, which keeps this layer free of hidden I/O.
use crate::cli::RootArgs;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Immutable parameters for one pipeline run.
///
/// The resolved snapshot is embedded in the JSON run summary, so every field
/// serializes under a stable name.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// FASTA file with the target sequences.
    pub input_fasta: PathBuf,
    /// Scratch root owning every intermediate artifact of the run.
    pub workspace_root: PathBuf,
    /// Fragment window length in bases.
    pub fragment_length: u32,
    /// RNAstructure installation used by the stem and folding stages.
    pub rnastructure_path: PathBuf,
    /// RNApathfinder installation used by the barrier stage.
    pub rnapathfinder_path: PathBuf,
    /// Worker-pool size forwarded unchanged to each stage.
    pub num_processes: u32,
    /// Iteration count for the downstream mutation generator.
    pub mutation_iterations: u32,
    /// Mutations generated per conformation downstream.
    pub mutations_per_conformation: u32,
}

/// Apply defaults and produce the immutable run configuration.
pub fn resolve(args: &RootArgs) -> RunConfig {
    RunConfig {
        input_fasta: args.input.clone(),
        workspace_root: resolve_workspace_root(args.workspace.as_deref()),
        fragment_length: args.fragment_length,
        rnastructure_path: args.rnastructure.clone(),
        rnapathfinder_path: args.rnapathfinder.clone(),
        num_processes: args.num_processes,
        mutation_iterations: args.mutation_iterations,
        mutations_per_conformation: args.mutations_per_conformation,
    }
}

/// Pick the scratch root: an explicit flag wins, otherwise a per-user cache
/// location, otherwise the system temp directory.
fn resolve_workspace_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    dirs::cache_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("swfind").join("workspace"))
        .unwrap_or_else(|| std::env::temp_dir().join("swfind-workspace"))
}
