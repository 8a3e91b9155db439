//! The podcast content pipeline.
//!
//! A run ingests a transcript, then research and outline stages run in
//! order, each committing its output to the [`SessionStore`]. Five asset
//! stages then run concurrently off that committed context; a failed asset
//! is counted and reported without stopping the others.

mod artifacts;
mod context;
mod error;
mod invoker;
mod orchestrator;
mod outcome;
mod stages;
mod types;

#[allow(unused_imports)]
pub use artifacts::{CONTEXT_FILE, OutputLayout, RAW_DIR_NAME, SNAPSHOT_FILE, write_json_atomic};
#[allow(unused_imports)]
pub use context::{HistoryEntry, PREVIEW_CHARS, SessionSnapshot, SessionStore};
#[allow(unused_imports)]
pub use error::{AttemptError, FailureKind, InvokeError, PipelineError};
#[allow(unused_imports)]
pub use invoker::{
    JSON_ONLY_CLARIFICATION, RetryPolicy, RetryingInvoker, StageOutput, tool_used_sentinel,
};
#[allow(unused_imports)]
pub use orchestrator::{PipelineBuilder, PipelineOrchestrator, PipelineRequest};
#[allow(unused_imports)]
pub use outcome::{PipelineEvent, PipelineReport, StageFailure};
#[allow(unused_imports)]
pub use stages::{
    NO_TRANSCRIPT, StageSpec, asset_prompt, outline_prompt, research_prompt, transcript_sample,
};
#[allow(unused_imports)]
pub use types::StageKind;
