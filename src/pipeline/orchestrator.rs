use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::agent::{AgentRoster, AgentSession, DynAgent};
use crate::client::LlmError;
use crate::config::{Config, PipelineSettings};
use crate::structured::TranscriptionOutput;
use crate::tools::{Transcriber, WhisperTranscriber};

use super::artifacts::{OutputLayout, write_json_atomic};
use super::context::SessionStore;
use super::error::PipelineError;
use super::invoker::{RetryPolicy, RetryingInvoker, StageOutput};
use super::outcome::{PipelineEvent, PipelineReport, StageFailure};
use super::stages::{
    NO_TRANSCRIPT, StageSpec, asset_prompt, outline_prompt, research_prompt, transcript_sample,
};
use super::types::StageKind;

const TRANSCRIPTION_MIN_TIMEOUT_SECS: u64 = 300;

/// Inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub topic: String,
    pub audio: Option<PathBuf>,
    pub transcript: Option<PathBuf>,
}

impl PipelineRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            audio: None,
            transcript: None,
        }
    }

    pub fn with_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio = Some(path.into());
        self
    }

    pub fn with_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript = Some(path.into());
        self
    }
}

pub struct PipelineOrchestrator {
    roster: AgentRoster,
    transcriber: Option<Arc<dyn Transcriber>>,
    layout: OutputLayout,
    policy: RetryPolicy,
    transcript_sample_chars: usize,
    session_id: String,
    cancel: CancellationToken,
}

impl PipelineOrchestrator {
    pub fn builder(roster: AgentRoster) -> PipelineBuilder {
        PipelineBuilder::new(roster)
    }

    /// Model-backed agents plus Whisper transcription, as configured.
    pub fn from_config(config: &Config, cancel: CancellationToken) -> Result<Self, LlmError> {
        let settings = &config.pipeline;
        let roster = AgentRoster::from_config(config, &settings.output_dir)?;
        let timeout = Duration::from_secs(config.llm.timeout_secs.max(TRANSCRIPTION_MIN_TIMEOUT_SECS));
        let transcriber = WhisperTranscriber::new(config.transcription.clone(), timeout);
        for (agent, tools) in roster.bindings() {
            debug!(agent, ?tools, "agent ready");
        }

        Ok(Self::builder(roster)
            .with_settings(settings)
            .with_transcriber(transcriber)
            .cancellation_token(cancel)
            .build())
    }

    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineReport, PipelineError> {
        self.run_with_store(request, SessionStore::new(self.session_id.clone()))
            .await
    }

    /// Runs against a caller-provided store, e.g. one seeded with a transcript.
    pub async fn run_with_store(
        &self,
        request: PipelineRequest,
        mut store: SessionStore,
    ) -> Result<PipelineReport, PipelineError> {
        self.layout.prepare().await?;

        let session = AgentSession::new(store.id());
        let invoker = RetryingInvoker::new(self.policy, self.layout.raw_dir(), self.cancel.clone());
        let mut events = Vec::new();
        let topic = request.topic.as_str();

        info!(session = session.id(), topic, "ingest: preparing transcript");
        events.push(PipelineEvent::StageStarted {
            stage: StageKind::Transcription,
        });
        let transcript = self.ingest(&request, &store).await?;
        let transcription = TranscriptionOutput::from_transcript(transcript.as_str());
        write_json_atomic(&self.layout.output_path(StageKind::Transcription), &transcription)
            .await?;
        store.set(StageKind::Transcription.context_key(), transcript.as_str());
        store.log_step("Ingest", &transcript);
        events.push(PipelineEvent::StageCompleted {
            stage: StageKind::Transcription,
        });

        info!("researching topic");
        let research = StageSpec::new(
            StageKind::Research,
            self.roster.research.clone(),
            research_prompt(topic),
        );
        let research = self
            .run_sequential(&invoker, &session, &mut store, &mut events, research)
            .await?;

        info!("creating outline");
        let sample = transcript_sample(&transcript, self.transcript_sample_chars);
        let outline = StageSpec::new(
            StageKind::Outline,
            self.roster.outline.clone(),
            outline_prompt(topic, sample, &research),
        );
        let outline = self
            .run_sequential(&invoker, &session, &mut store, &mut events, outline)
            .await?;

        info!("generating assets (parallel)");
        let agents: [&DynAgent; 5] = [
            &self.roster.show_notes,
            &self.roster.timestamps,
            &self.roster.quotes,
            &self.roster.social,
            &self.roster.seo,
        ];
        let specs: Vec<StageSpec> = StageKind::PARALLEL
            .into_iter()
            .zip(agents)
            .map(|(kind, agent)| {
                StageSpec::new(kind, agent.clone(), asset_prompt(kind, topic, &outline, sample))
            })
            .collect();
        for spec in &specs {
            events.push(PipelineEvent::StageStarted { stage: spec.kind });
        }

        let results = join_all(
            specs
                .iter()
                .map(|spec| self.run_asset(&invoker, &session, spec)),
        )
        .await;

        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let mut succeeded = 0;
        let mut failures = Vec::new();
        for (index, (spec, result)) in specs.iter().zip(results).enumerate() {
            match result {
                Ok(output) => {
                    succeeded += 1;
                    store.log_step(spec.agent.name(), &output.raw);
                    events.push(PipelineEvent::StageCompleted { stage: spec.kind });
                }
                Err(err) => {
                    let message = err.to_string();
                    error!(index, stage = %spec.kind, error = %message, "asset task failed");
                    events.push(PipelineEvent::StageFailed {
                        stage: spec.kind,
                        error: message.clone(),
                    });
                    failures.push(StageFailure {
                        index,
                        stage: spec.kind,
                        error: message,
                    });
                }
            }
        }

        let failed = failures.len();
        if failed > 0 {
            warn!(failed, "asset stage(s) failed; check raw outputs for details");
        }
        events.push(PipelineEvent::ParallelSettled { succeeded, failed });

        let context = json!({
            "topic": topic,
            "transcript": store.get_or("transcript", Value::Null),
            "research": store.get_or("research", Value::Null),
            "outline": store.get_or("outline", Value::Null),
        });
        write_json_atomic(&self.layout.context_path(), &context).await?;
        write_json_atomic(&self.layout.snapshot_path(), &store.snapshot()).await?;
        store.clear();
        events.push(PipelineEvent::DiagnosticsWritten);

        info!(succeeded, failed, "pipeline finished");
        Ok(PipelineReport {
            topic: request.topic.clone(),
            output_dir: self.layout.output_dir().to_path_buf(),
            raw_dir: self.layout.raw_dir().to_path_buf(),
            succeeded,
            failed,
            failures,
            events,
        })
    }

    /// Resolves transcript text: audio, then transcript file, then stored value.
    async fn ingest(
        &self,
        request: &PipelineRequest,
        store: &SessionStore,
    ) -> Result<String, PipelineError> {
        if let Some(audio) = &request.audio {
            let transcriber = self.transcriber.clone().ok_or_else(|| {
                PipelineError::Transcription("no transcriber configured".to_string())
            })?;
            let path = audio.clone();
            info!(path = %path.display(), "transcribing audio (this may take a while)");

            let worker = tokio::task::spawn_blocking(move || transcriber.transcribe(&path));
            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(PipelineError::Cancelled),
                joined = worker => joined.map_err(|err| {
                    PipelineError::Transcription(format!("transcription worker failed: {err}"))
                })?,
            };

            let data = result.into_result().map_err(PipelineError::Transcription)?;
            return data
                .get("transcript")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    PipelineError::Transcription("result is missing `transcript`".to_string())
                });
        }

        if let Some(path) = &request.transcript {
            return tokio::fs::read_to_string(path)
                .await
                .map_err(|source| PipelineError::TranscriptRead {
                    path: path.clone(),
                    source,
                });
        }

        Ok(store
            .get_str(StageKind::Transcription.context_key())
            .unwrap_or(NO_TRANSCRIPT)
            .to_string())
    }

    async fn run_sequential(
        &self,
        invoker: &RetryingInvoker,
        session: &AgentSession,
        store: &mut SessionStore,
        events: &mut Vec<PipelineEvent>,
        spec: StageSpec,
    ) -> Result<Value, PipelineError> {
        events.push(PipelineEvent::StageStarted { stage: spec.kind });

        let output = invoker
            .invoke(session, &spec)
            .await
            .map_err(|err| PipelineError::stage(spec.kind, err))?;
        write_json_atomic(&self.layout.output_path(spec.kind), &output.value).await?;

        store.set(spec.kind.context_key(), output.value.clone());
        store.log_step(spec.agent.name(), &output.raw);
        events.push(PipelineEvent::StageCompleted { stage: spec.kind });
        Ok(output.value)
    }

    /// Invokes one asset stage and persists its output; never touches the store.
    async fn run_asset(
        &self,
        invoker: &RetryingInvoker,
        session: &AgentSession,
        spec: &StageSpec,
    ) -> Result<StageOutput, PipelineError> {
        let output = invoker
            .invoke(session, spec)
            .await
            .map_err(|err| PipelineError::stage(spec.kind, err))?;
        write_json_atomic(&self.layout.output_path(spec.kind), &output.value).await?;
        Ok(output)
    }
}

pub struct PipelineBuilder {
    roster: AgentRoster,
    transcriber: Option<Arc<dyn Transcriber>>,
    output_dir: PathBuf,
    policy: RetryPolicy,
    transcript_sample_chars: usize,
    session_id: String,
    cancel: CancellationToken,
}

impl PipelineBuilder {
    pub fn new(roster: AgentRoster) -> Self {
        let defaults = PipelineSettings::default();
        Self {
            roster,
            transcriber: None,
            output_dir: defaults.output_dir.clone(),
            policy: RetryPolicy::from_settings(&defaults),
            transcript_sample_chars: defaults.transcript_sample_chars,
            session_id: defaults.session_id,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_settings(self, settings: &PipelineSettings) -> Self {
        self.output_dir(settings.output_dir.clone())
            .retry_policy(RetryPolicy::from_settings(settings))
            .transcript_sample_chars(settings.transcript_sample_chars)
            .session_id(settings.session_id.clone())
    }

    pub fn with_transcriber<T>(mut self, transcriber: T) -> Self
    where
        T: Transcriber + 'static,
    {
        self.transcriber = Some(Arc::new(transcriber));
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn transcript_sample_chars(mut self, max_chars: usize) -> Self {
        self.transcript_sample_chars = max_chars;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn build(self) -> PipelineOrchestrator {
        PipelineOrchestrator {
            roster: self.roster,
            transcriber: self.transcriber,
            layout: OutputLayout::new(self.output_dir),
            policy: self.policy,
            transcript_sample_chars: self.transcript_sample_chars,
            session_id: self.session_id,
            cancel: self.cancel,
        }
    }
}
