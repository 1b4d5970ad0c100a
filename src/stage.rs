//! Stage capability and typed per-stage configuration.
//!
//! The dispatcher hands each stage a typed configuration and receives back
//! the artifacts it produced. The flat flag/value vector only exists at the
//! boundary with the external stage programs, so nothing inside the
//! orchestrator round-trips through strings.
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// The five fixed pipeline stages, in dispatch order.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Preprocess,
    FindStems,
    FoldConformations,
    EnergyBarriers,
    Classify,
}

impl StageKind {
    /// All stages in dispatch order.
    pub const ORDER: [StageKind; 5] = [
        StageKind::Preprocess,
        StageKind::FindStems,
        StageKind::FoldConformations,
        StageKind::EnergyBarriers,
        StageKind::Classify,
    ];

    /// Return the stable string identifier used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Preprocess => "preprocess",
            StageKind::FindStems => "find_stems",
            StageKind::FoldConformations => "fold_conformations",
            StageKind::EnergyBarriers => "energy_barriers",
            StageKind::Classify => "classify",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact paths a stage reports back after a successful run.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    paths: Vec<PathBuf>,
}

impl ArtifactSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// One pipeline stage.
///
/// Implementations are injected into the dispatcher, which keeps the
/// orchestration decoupled from any fixed installation layout. Production
/// stages wrap external programs; tests substitute in-process fakes.
pub trait Stage {
    fn run(&self, config: &StageConfig) -> Result<ArtifactSet>;
}

/// The injected implementation for each of the five stages.
pub struct StageSet {
    stages: [Box<dyn Stage>; 5],
}

impl StageSet {
    /// Build a stage set from one implementation per stage, in dispatch order.
    pub fn new(stages: [Box<dyn Stage>; 5]) -> Self {
        Self { stages }
    }

    /// Return the implementation registered for a stage.
    pub fn stage_for(&self, kind: StageKind) -> &dyn Stage {
        self.stages[kind as usize].as_ref()
    }
}

/// Chop input sequences into fixed-length fragments.
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub input_fasta: PathBuf,
    pub chopped_output: PathBuf,
    pub fragment_length: u32,
}

/// Detect mutually exclusive stem pairs per fragment.
///
/// The stage fills `output_dir` with per-fragment reports and writes the
/// canonical summary at `summary_output` inside it.
#[derive(Debug, Clone)]
pub struct FindStemsConfig {
    pub chopped_input: PathBuf,
    pub scratch_dir: PathBuf,
    pub output_dir: PathBuf,
    pub summary_output: PathBuf,
    pub rnastructure_path: PathBuf,
    pub num_processes: u32,
}

/// Fold the two conformations implied by each fragment's stem pair.
#[derive(Debug, Clone)]
pub struct FoldConfig {
    pub chopped_input: PathBuf,
    pub scratch_dir: PathBuf,
    pub stems_summary: PathBuf,
    pub conformations_output: PathBuf,
    pub rnastructure_path: PathBuf,
    pub num_processes: u32,
}

/// Compute the transition barrier between each conformation pair.
#[derive(Debug, Clone)]
pub struct BarrierConfig {
    pub conformations_input: PathBuf,
    pub barriers_output: PathBuf,
    pub scratch_dir: PathBuf,
    pub rnapathfinder_path: PathBuf,
    pub num_processes: u32,
}

/// Score fragments and render the candidate reports.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub barriers_input: PathBuf,
    pub scores_output: PathBuf,
    pub report_output: PathBuf,
    pub report_short_output: PathBuf,
}

/// Typed configuration for one stage invocation.
#[derive(Debug, Clone)]
pub enum StageConfig {
    Preprocess(PreprocessConfig),
    FindStems(FindStemsConfig),
    FoldConformations(FoldConfig),
    EnergyBarriers(BarrierConfig),
    Classify(ClassifyConfig),
}

impl StageConfig {
    /// Return which of the five stages this configuration drives.
    pub fn kind(&self) -> StageKind {
        match self {
            StageConfig::Preprocess(_) => StageKind::Preprocess,
            StageConfig::FindStems(_) => StageKind::FindStems,
            StageConfig::FoldConformations(_) => StageKind::FoldConformations,
            StageConfig::EnergyBarriers(_) => StageKind::EnergyBarriers,
            StageConfig::Classify(_) => StageKind::Classify,
        }
    }

    /// Artifact paths this stage consumes from earlier stages (or, for the
    /// first stage, from the caller).
    pub fn inputs(&self) -> Vec<PathBuf> {
        match self {
            StageConfig::Preprocess(c) => vec![c.input_fasta.clone()],
            StageConfig::FindStems(c) => vec![c.chopped_input.clone()],
            StageConfig::FoldConformations(c) => {
                vec![c.chopped_input.clone(), c.stems_summary.clone()]
            }
            StageConfig::EnergyBarriers(c) => vec![c.conformations_input.clone()],
            StageConfig::Classify(c) => vec![c.barriers_input.clone()],
        }
    }

    /// Artifact paths this stage produces for later stages (or as the final
    /// pipeline output).
    pub fn outputs(&self) -> Vec<PathBuf> {
        match self {
            StageConfig::Preprocess(c) => vec![c.chopped_output.clone()],
            StageConfig::FindStems(c) => vec![c.summary_output.clone()],
            StageConfig::FoldConformations(c) => vec![c.conformations_output.clone()],
            StageConfig::EnergyBarriers(c) => vec![c.barriers_output.clone()],
            StageConfig::Classify(c) => vec![
                c.scores_output.clone(),
                c.report_output.clone(),
                c.report_short_output.clone(),
            ],
        }
    }

    /// Flatten the configuration into the flag/value vector the external
    /// stage program expects.
    pub fn argv(&self) -> Vec<String> {
        match self {
            StageConfig::Preprocess(c) => vec![
                "-f".into(),
                path_arg(&c.input_fasta),
                "-o".into(),
                path_arg(&c.chopped_output),
                "--length".into(),
                c.fragment_length.to_string(),
            ],
            StageConfig::FindStems(c) => vec![
                "-f".into(),
                path_arg(&c.chopped_input),
                "--temp_files_folder".into(),
                path_arg(&c.scratch_dir),
                "-o".into(),
                path_arg(&c.output_dir),
                "--RNAstructure_path".into(),
                path_arg(&c.rnastructure_path),
                "--num_processes".into(),
                c.num_processes.to_string(),
            ],
            StageConfig::FoldConformations(c) => vec![
                "-f".into(),
                path_arg(&c.chopped_input),
                "--temp_files_folder".into(),
                path_arg(&c.scratch_dir),
                "-s".into(),
                path_arg(&c.stems_summary),
                "-o".into(),
                path_arg(&c.conformations_output),
                "--RNAstructure_path".into(),
                path_arg(&c.rnastructure_path),
                "--num_processes".into(),
                c.num_processes.to_string(),
            ],
            StageConfig::EnergyBarriers(c) => vec![
                "--dotbracket".into(),
                path_arg(&c.conformations_input),
                "-o".into(),
                path_arg(&c.barriers_output),
                "--temp_files_folder".into(),
                path_arg(&c.scratch_dir),
                "--num_processes".into(),
                c.num_processes.to_string(),
                "--path_rnapathfinder".into(),
                path_arg(&c.rnapathfinder_path),
            ],
            StageConfig::Classify(c) => vec![
                "--energies_filename".into(),
                path_arg(&c.barriers_input),
                "--dataframe_output".into(),
                path_arg(&c.scores_output),
                "--text_output".into(),
                path_arg(&c.report_output),
                "--text_output_short".into(),
                path_arg(&c.report_short_output),
            ],
        }
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
