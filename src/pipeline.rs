//! Sequential dispatch of the five pipeline stages.
//!
//! The dispatcher is a small state machine so a failed run records exactly
//! which stage broke. Stages never run concurrently at this level and the
//! first failure aborts the remainder of the chain; any parallelism lives
//! inside a stage and is only parameterized by the worker-pool size.
use crate::config::RunConfig;
use crate::stage::{
    BarrierConfig, ClassifyConfig, FindStemsConfig, FoldConfig, PreprocessConfig, StageConfig,
    StageKind, StageSet,
};
use crate::workspace::WorkspacePaths;
use anyhow::Result;
use serde::Serialize;

/// Dispatch progress for one pipeline run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Running { stage: StageKind },
    Completed,
    Failed { stage: StageKind, cause: String },
}

/// Build the typed configuration for every stage, wired to one workspace.
///
/// The chain is strictly linear: each stage's declared outputs are exactly
/// what the next stage consumes, with the classifier reading only the
/// energy-barrier table and fanning out into the final reports.
pub fn plan_stages(paths: &WorkspacePaths, config: &RunConfig) -> Vec<StageConfig> {
    vec![
        StageConfig::Preprocess(PreprocessConfig {
            input_fasta: config.input_fasta.clone(),
            chopped_output: paths.chopped_sequences_path(),
            fragment_length: config.fragment_length,
        }),
        StageConfig::FindStems(FindStemsConfig {
            chopped_input: paths.chopped_sequences_path(),
            scratch_dir: paths.engine_scratch_dir(),
            output_dir: paths.stems_dir(),
            summary_output: paths.stems_summary_path(),
            rnastructure_path: config.rnastructure_path.clone(),
            num_processes: config.num_processes,
        }),
        StageConfig::FoldConformations(FoldConfig {
            chopped_input: paths.chopped_sequences_path(),
            scratch_dir: paths.engine_scratch_dir(),
            stems_summary: paths.stems_summary_path(),
            conformations_output: paths.conformations_path(),
            rnastructure_path: config.rnastructure_path.clone(),
            num_processes: config.num_processes,
        }),
        StageConfig::EnergyBarriers(BarrierConfig {
            conformations_input: paths.conformations_path(),
            barriers_output: paths.energy_barriers_path(),
            scratch_dir: paths.engine_scratch_dir(),
            rnapathfinder_path: config.rnapathfinder_path.clone(),
            num_processes: config.num_processes,
        }),
        StageConfig::Classify(ClassifyConfig {
            barriers_input: paths.energy_barriers_path(),
            scores_output: paths.scores_path(),
            report_output: paths.report_path(),
            report_short_output: paths.report_short_path(),
        }),
    ]
}

/// Runs the five stages strictly in order against one workspace.
pub struct Pipeline {
    stages: StageSet,
    plan: Vec<StageConfig>,
    state: PipelineState,
}

impl Pipeline {
    /// Build a dispatcher over injected stage implementations.
    ///
    /// Precondition: `paths.materialize()` has already created the full
    /// workspace tree.
    pub fn new(stages: StageSet, paths: &WorkspacePaths, config: &RunConfig) -> Self {
        Self {
            stages,
            plan: plan_stages(paths, config),
            state: PipelineState::Idle,
        }
    }

    /// Return the current dispatch state.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Execute the stages in order, stopping at the first failure.
    ///
    /// No retry and no partial resumption: a failed run leaves the workspace
    /// populated for inspection, and rerunning starts again from stage 1.
    pub fn run(&mut self) -> Result<()> {
        let plan = self.plan.clone();
        for config in &plan {
            let kind = config.kind();
            self.state = PipelineState::Running { stage: kind };
            tracing::info!(stage = kind.as_str(), "stage started");
            tracing::debug!(
                stage = kind.as_str(),
                inputs = ?config.inputs(),
                outputs = ?config.outputs(),
                "stage contract"
            );
            match self.stages.stage_for(kind).run(config) {
                Ok(artifacts) => {
                    tracing::info!(
                        stage = kind.as_str(),
                        artifacts = artifacts.paths().len(),
                        "stage completed"
                    );
                }
                Err(err) => {
                    self.state = PipelineState::Failed {
                        stage: kind,
                        cause: format!("{err:#}"),
                    };
                    return Err(err.context(format!("stage {kind} failed")));
                }
            }
        }
        self.state = PipelineState::Completed;
        Ok(())
    }
}

/// Final run summary emitted with `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub config: RunConfig,
    pub pipeline: PipelineState,
}

impl RunSummary {
    pub fn new(config: &RunConfig, state: &PipelineState) -> Self {
        Self {
            config: config.clone(),
            pipeline: state.clone(),
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
