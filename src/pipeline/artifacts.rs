use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use super::error::PipelineError;
use super::types::StageKind;

pub const RAW_DIR_NAME: &str = "agents_rawdata";
pub const CONTEXT_FILE: &str = "context.json";
pub const SNAPSHOT_FILE: &str = "session_snapshot.json";

/// Where a run puts its stage outputs, traces and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_dir: PathBuf,
    raw_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let raw_dir = output_dir.join(RAW_DIR_NAME);
        Self {
            output_dir,
            raw_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Creates both directories; safe to call repeatedly.
    pub async fn prepare(&self) -> Result<(), PipelineError> {
        fs::create_dir_all(&self.raw_dir)
            .await
            .map_err(|source| PipelineError::Io {
                path: self.raw_dir.clone(),
                source,
            })
    }

    pub fn output_path(&self, stage: StageKind) -> PathBuf {
        self.output_dir.join(stage.output_file())
    }

    pub fn context_path(&self) -> PathBuf {
        self.raw_dir.join(CONTEXT_FILE)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.raw_dir.join(SNAPSHOT_FILE)
    }
}

/// Writes pretty-printed JSON through a temp file and rename.
pub async fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), PipelineError>
where
    T: Serialize + ?Sized,
{
    let contents =
        serde_json::to_string_pretty(value).map_err(|source| PipelineError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .await
        .map_err(|source| PipelineError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}
