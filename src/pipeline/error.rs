use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::agent::AgentError;
use crate::structured::{ExtractError, ShapeError};

use super::types::StageKind;

/// How the invoker should react to a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Throttling or quota exhaustion: back off and try again.
    Transient,
    /// No parseable JSON object in the reply.
    Parse,
    /// A JSON object that does not match the stage's shape.
    Validation,
    Permanent,
}

/// Failure of a single agent attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("Failed to write trace {}: {source}", .path.display())]
    Trace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttemptError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AttemptError::Agent(err) if err.is_transient() => FailureKind::Transient,
            AttemptError::Agent(_) => FailureKind::Permanent,
            AttemptError::Extract(_) => FailureKind::Parse,
            AttemptError::Shape(_) => FailureKind::Validation,
            AttemptError::Trace { .. } => FailureKind::Permanent,
        }
    }
}

/// Stage-level failure reported by the retrying invoker.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Permanent error running {agent}: {source}. Raw output: {}", .trace.display())]
    Permanent {
        agent: String,
        trace: PathBuf,
        #[source]
        source: AttemptError,
    },
    #[error("{agent} failed after {attempts} attempts. Check {} for details.", .trace.display())]
    Exhausted {
        agent: String,
        attempts: u32,
        trace: PathBuf,
    },
    #[error("{agent} was cancelled")]
    Cancelled { agent: String },
}

impl InvokeError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, InvokeError::Cancelled { .. })
    }
}

/// Failures that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: StageKind,
        #[source]
        source: InvokeError,
    },
    #[error("Transcription failed: {0}")]
    Transcription(String),
    #[error("Failed to read transcript {}: {source}", .path.display())]
    TranscriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Pipeline run cancelled")]
    Cancelled,
}

impl PipelineError {
    pub(crate) fn stage(stage: StageKind, source: InvokeError) -> Self {
        if source.is_cancelled() {
            PipelineError::Cancelled
        } else {
            PipelineError::Stage { stage, source }
        }
    }
}
