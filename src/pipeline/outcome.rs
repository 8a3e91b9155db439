use std::path::PathBuf;

use serde::Serialize;

use super::types::StageKind;

/// A parallel-phase stage that did not produce its output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    /// Position within the parallel group, starting at 0.
    pub index: usize,
    pub stage: StageKind,
    pub error: String,
}

/// Audit events recorded while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    StageStarted { stage: StageKind },
    StageCompleted { stage: StageKind },
    StageFailed { stage: StageKind, error: String },
    ParallelSettled { succeeded: usize, failed: usize },
    DiagnosticsWritten,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub topic: String,
    pub output_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<StageFailure>,
    pub events: Vec<PipelineEvent>,
}

impl PipelineReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}
