use std::fmt;

use serde::Serialize;

use crate::structured::{
    OutlineOutput, QuotesOutput, ResearchOutput, SeoOutput, Shape, ShowNotesOutput, SocialOutput,
    TimestampOutput, TranscriptionOutput,
};

/// Stages of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Transcription,
    Research,
    Outline,
    ShowNotes,
    Timestamps,
    Quotes,
    Social,
    Seo,
}

impl StageKind {
    /// The independent asset stages, in launch order.
    pub const PARALLEL: [StageKind; 5] = [
        StageKind::ShowNotes,
        StageKind::Timestamps,
        StageKind::Quotes,
        StageKind::Social,
        StageKind::Seo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StageKind::Transcription => "transcription",
            StageKind::Research => "research",
            StageKind::Outline => "outline",
            StageKind::ShowNotes => "show_notes",
            StageKind::Timestamps => "timestamps",
            StageKind::Quotes => "quotes",
            StageKind::Social => "social",
            StageKind::Seo => "seo",
        }
    }

    pub fn output_file(self) -> String {
        format!("{}.json", self.label())
    }

    pub fn trace_file(self) -> String {
        format!("{}_raw.txt", self.label())
    }

    /// Key under which a sequential stage commits its output.
    pub fn context_key(self) -> &'static str {
        match self {
            StageKind::Transcription => "transcript",
            other => other.label(),
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            StageKind::Transcription => Shape::of::<TranscriptionOutput>("TranscriptionOutput"),
            StageKind::Research => Shape::of::<ResearchOutput>("ResearchOutput"),
            StageKind::Outline => Shape::of::<OutlineOutput>("OutlineOutput"),
            StageKind::ShowNotes => Shape::of::<ShowNotesOutput>("ShowNotesOutput"),
            StageKind::Timestamps => Shape::of::<TimestampOutput>("TimestampOutput"),
            StageKind::Quotes => Shape::of::<QuotesOutput>("QuotesOutput"),
            StageKind::Social => Shape::of::<SocialOutput>("SocialOutput"),
            StageKind::Seo => Shape::of::<SeoOutput>("SEOOutput"),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
