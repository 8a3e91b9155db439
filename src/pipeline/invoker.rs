use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::agent::AgentSession;
use crate::config::PipelineSettings;
use crate::structured::extract_json_object;

use super::error::{AttemptError, FailureKind, InvokeError};
use super::stages::StageSpec;

/// Appended to the prompt after the first malformed reply.
pub const JSON_ONLY_CLARIFICATION: &str = "IMPORTANT: Return ONLY the JSON object with no extra text, preambles, or markdown formatting.";

/// Returned in place of a parsed object when the agent replied with no text.
pub fn tool_used_sentinel() -> Value {
    json!({"status": "tool_used"})
}

/// A stage's validated object together with the reply it was extracted from.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub value: Value,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts,
            backoff_base,
        }
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new(settings.max_attempts, settings.backoff_base())
    }

    /// Sleep before retrying after the `attempt`-th transient failure.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&PipelineSettings::default())
    }
}

/// Runs one stage's agent with bounded attempts.
///
/// Transient failures back off linearly. The first malformed reply earns one
/// retry with a JSON-only reminder; every other failure is permanent.
#[derive(Debug, Clone)]
pub struct RetryingInvoker {
    policy: RetryPolicy,
    raw_dir: PathBuf,
    cancel: CancellationToken,
}

impl RetryingInvoker {
    pub fn new(policy: RetryPolicy, raw_dir: impl Into<PathBuf>, cancel: CancellationToken) -> Self {
        Self {
            policy,
            raw_dir: raw_dir.into(),
            cancel,
        }
    }

    pub async fn invoke(
        &self,
        session: &AgentSession,
        stage: &StageSpec,
    ) -> Result<StageOutput, InvokeError> {
        let agent = stage.agent.name().to_string();
        let max_attempts = stage.max_attempts.unwrap_or(self.policy.max_attempts);
        let trace = self.raw_dir.join(stage.trace_file());
        let mut prompt = stage.prompt.clone();
        let mut attempt = 0;

        while attempt < max_attempts {
            attempt += 1;
            info!(agent = %agent, stage = %stage.kind, attempt, max_attempts, "invoking agent");

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(InvokeError::Cancelled { agent }),
                outcome = self.attempt(session, stage, &prompt, &trace) => outcome,
            };

            let err = match outcome {
                Ok(output) => return Ok(output),
                Err(err) => err,
            };

            match err.kind() {
                FailureKind::Transient => {
                    let wait = self.policy.backoff_for(attempt);
                    warn!(
                        agent = %agent,
                        attempt,
                        max_attempts,
                        wait_secs = wait.as_secs_f64(),
                        error = %err,
                        "transient error; backing off"
                    );
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return Err(InvokeError::Cancelled { agent }),
                        _ = tokio::time::sleep(wait) => {}
                    }
                }
                FailureKind::Parse | FailureKind::Validation if attempt == 1 => {
                    warn!(agent = %agent, error = %err, "parsing/validation failed; retrying with JSON-only instruction");
                    prompt = format!("{prompt}\n\n{JSON_ONLY_CLARIFICATION}");
                }
                _ => {
                    error!(agent = %agent, error = %err, "permanent error running agent");
                    return Err(InvokeError::Permanent {
                        agent,
                        trace,
                        source: err,
                    });
                }
            }
        }

        Err(InvokeError::Exhausted {
            agent,
            attempts: max_attempts,
            trace,
        })
    }

    async fn attempt(
        &self,
        session: &AgentSession,
        stage: &StageSpec,
        prompt: &str,
        trace: &Path,
    ) -> Result<StageOutput, AttemptError> {
        let text = stage.agent.generate(session, prompt).await?;

        fs::write(trace, &text)
            .await
            .map_err(|source| AttemptError::Trace {
                path: trace.to_path_buf(),
                source,
            })?;
        debug!(trace = %trace.display(), bytes = text.len(), "saved raw agent output");

        if text.trim().is_empty() {
            return Ok(StageOutput {
                value: tool_used_sentinel(),
                raw: text,
            });
        }

        let value = extract_json_object(&text)?;
        if let Some(shape) = &stage.shape {
            shape.validate(&value)?;
        }
        Ok(StageOutput { value, raw: text })
    }
}
