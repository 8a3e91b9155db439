use serde_json::Value;

use crate::agent::DynAgent;
use crate::structured::Shape;

use super::types::StageKind;

/// Transcript used when no audio, transcript file, or stored value exists.
pub const NO_TRANSCRIPT: &str = "No transcript provided.";

/// One unit of agent work: who to ask, what to ask, and what shape to expect.
#[derive(Clone)]
pub struct StageSpec {
    pub kind: StageKind,
    pub agent: DynAgent,
    pub prompt: String,
    pub shape: Option<Shape>,
    /// Overrides the invoker's default attempt limit.
    pub max_attempts: Option<u32>,
}

impl StageSpec {
    pub fn new(kind: StageKind, agent: DynAgent, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            agent,
            prompt: prompt.into(),
            shape: Some(kind.shape()),
            max_attempts: None,
        }
    }

    #[cfg(test)]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[cfg(test)]
    pub fn without_shape(mut self) -> Self {
        self.shape = None;
        self
    }

    pub fn trace_file(&self) -> String {
        self.kind.trace_file()
    }
}

/// Leading `max_chars` characters of the transcript.
pub fn transcript_sample(transcript: &str, max_chars: usize) -> &str {
    match transcript.char_indices().nth(max_chars) {
        Some((end, _)) => &transcript[..end],
        None => transcript,
    }
}

pub fn research_prompt(topic: &str) -> String {
    format!(
        "Research this podcast topic: {topic}. Return JSON with fields: 'summary', 'bullets', 'citations'."
    )
}

pub fn outline_prompt(topic: &str, transcript_sample: &str, research: &Value) -> String {
    format!(
        "Create a podcast outline for \"{topic}\" using the research and transcript sample. \
         Return JSON with fields: 'hook', 'segments', 'closing'.\n\n\
         Research:\n{research}\n\n\
         Transcript sample:\n{transcript_sample}"
    )
}

fn asset_request(kind: StageKind) -> &'static str {
    match kind {
        StageKind::ShowNotes => "Write comprehensive show notes in JSON format.",
        StageKind::Timestamps => "Generate exactly 8 chapter timestamps with descriptions (JSON).",
        StageKind::Quotes => "Extract 5 memorable and shareable quotes (JSON).",
        StageKind::Social => {
            "Create social media posts: twitter_thread, linkedin_posts, instagram_captions (JSON)."
        }
        StageKind::Seo => "Generate SEO metadata: title, meta_description, keywords (JSON).",
        StageKind::Transcription | StageKind::Research | StageKind::Outline => {
            "Return the requested JSON object."
        }
    }
}

/// Prompt for a parallel-phase stage; reads only committed sequential context.
pub fn asset_prompt(kind: StageKind, topic: &str, outline: &Value, transcript_sample: &str) -> String {
    format!(
        "{request}\n\nEpisode topic: {topic}\n\nOutline:\n{outline}\n\nTranscript sample:\n{transcript_sample}",
        request = asset_request(kind),
    )
}
