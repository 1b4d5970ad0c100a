//! Production stages backed by external programs.
//!
//! Each stage entry point lives in its own executable. Resolution prefers a
//! sibling of the running binary so a packaged installation works without
//! PATH setup, then falls back to PATH lookup. Resolution happens when the
//! stage runs, so a missing program surfaces as a stage failure rather than
//! an upfront configuration failure.
use crate::stage::{ArtifactSet, Stage, StageConfig, StageKind, StageSet};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Executable name for each stage entry point.
pub fn program_name(kind: StageKind) -> &'static str {
    match kind {
        StageKind::Preprocess => "swf-preprocess",
        StageKind::FindStems => "swf-find-stems",
        StageKind::FoldConformations => "swf-fold-structures",
        StageKind::EnergyBarriers => "swf-energy-barriers",
        StageKind::Classify => "swf-classify",
    }
}

/// A stage dispatched as an external process.
#[derive(Debug, Clone)]
pub struct ExternalStage {
    program: &'static str,
}

impl ExternalStage {
    /// Wrap the external program registered for a stage.
    pub fn for_kind(kind: StageKind) -> Self {
        Self {
            program: program_name(kind),
        }
    }

    fn resolve_program(&self) -> Result<PathBuf> {
        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                let sibling = dir.join(self.program);
                if sibling.is_file() {
                    return Ok(sibling);
                }
            }
        }
        which::which(self.program)
            .with_context(|| format!("stage program {} not found", self.program))
    }
}

impl Stage for ExternalStage {
    fn run(&self, config: &StageConfig) -> Result<ArtifactSet> {
        let program = self.resolve_program()?;
        let argv = config.argv();
        tracing::debug!(program = %program.display(), ?argv, "spawning stage program");
        let status = Command::new(&program)
            .args(argv)
            .status()
            .with_context(|| format!("spawn {}", program.display()))?;
        if !status.success() {
            return Err(anyhow!(
                "{} exited with {}",
                program.display(),
                exit_status_string(&status)
            ));
        }
        Ok(ArtifactSet::new(config.outputs()))
    }
}

fn exit_status_string(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Build the production stage set, one external program per stage.
pub fn external_stage_set() -> StageSet {
    StageSet::new(
        StageKind::ORDER.map(|kind| Box::new(ExternalStage::for_kind(kind)) as Box<dyn Stage>),
    )
}
