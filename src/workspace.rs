//! Typed paths into a pipeline workspace.
//!
//! Centralizing path construction keeps every stage pointed at the same
//! artifact names and prevents drift when the layout evolves. Every path is
//! a pure function of the workspace root and a fixed naming scheme.
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Convenience wrapper for locating workspace artifacts.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    /// Create a new path helper rooted at the workspace root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the workspace root used for path derivation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `inputs/` directory path.
    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("inputs")
    }

    /// Return the `interm/` directory path holding all intermediate artifacts.
    pub fn interm_dir(&self) -> PathBuf {
        self.root.join("interm")
    }

    /// Return the scratch directory handed to the folding and path-finding
    /// engines by stages 2-4.
    pub fn engine_scratch_dir(&self) -> PathBuf {
        self.interm_dir().join("engine_scratch")
    }

    /// Return the `interm/chopped_sequences.fa` path.
    pub fn chopped_sequences_path(&self) -> PathBuf {
        self.interm_dir().join("chopped_sequences.fa")
    }

    /// Return the directory the stem search fills with per-fragment reports.
    pub fn stems_dir(&self) -> PathBuf {
        self.interm_dir().join("mutually_exclusive_stems")
    }

    /// Return the canonical stem summary the stem search writes into its
    /// report directory.
    pub fn stems_summary_path(&self) -> PathBuf {
        self.stems_dir().join("output.txt")
    }

    /// Return the `interm/mutually_exclusive_conformations.txt` path.
    pub fn conformations_path(&self) -> PathBuf {
        self.interm_dir().join("mutually_exclusive_conformations.txt")
    }

    /// Return the `interm/energy_barriers.txt` path.
    pub fn energy_barriers_path(&self) -> PathBuf {
        self.interm_dir().join("energy_barriers.txt")
    }

    /// Return the per-fragment switch score table path.
    pub fn scores_path(&self) -> PathBuf {
        self.interm_dir().join("RNA_switch_scores.txt")
    }

    /// Return the full text report path.
    pub fn report_path(&self) -> PathBuf {
        self.interm_dir().join("RNA_switch_structures_full.txt")
    }

    /// Return the condensed text report path.
    pub fn report_short_path(&self) -> PathBuf {
        self.interm_dir().join("RNA_switch_structures.txt")
    }

    /// Return the mutation-generation scratch directory.
    pub fn mutations_dir(&self) -> PathBuf {
        self.interm_dir().join("generate_mutations")
    }

    /// Return the perturbation list written by the mutation generator.
    pub fn perturbations_path(&self) -> PathBuf {
        self.mutations_dir().join("perturbations.txt")
    }

    /// Return the final merged-mutations file path.
    pub fn merged_mutations_path(&self) -> PathBuf {
        self.interm_dir().join("generated_mutations.txt")
    }

    /// Every directory the pipeline expects to exist before stage 1 runs.
    pub fn directories(&self) -> [PathBuf; 6] {
        [
            self.root.clone(),
            self.inputs_dir(),
            self.interm_dir(),
            self.engine_scratch_dir(),
            self.stems_dir(),
            self.mutations_dir(),
        ]
    }

    /// Stable label/path pairs for every named artifact, for transcripts.
    pub fn artifact_paths(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("chopped_sequences", self.chopped_sequences_path()),
            ("stems_summary", self.stems_summary_path()),
            ("conformations", self.conformations_path()),
            ("energy_barriers", self.energy_barriers_path()),
            ("scores", self.scores_path()),
            ("report_full", self.report_path()),
            ("report_short", self.report_short_path()),
            ("perturbations", self.perturbations_path()),
            ("merged_mutations", self.merged_mutations_path()),
        ]
    }

    /// Create the full directory tree.
    ///
    /// Dispatch requires the whole tree up front, before any stage runs.
    /// Creation is idempotent: existing directories and their contents are
    /// left untouched.
    pub fn materialize(&self) -> Result<()> {
        for dir in self.directories() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("create workspace directory {}", dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
