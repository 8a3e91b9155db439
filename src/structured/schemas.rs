//! Typed payloads each pipeline stage must produce.
//!
//! Unknown keys are tolerated; missing or mistyped keys are not.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionOutput {
    pub transcript: String,
    pub word_count: u64,
}

impl TranscriptionOutput {
    pub fn from_transcript(transcript: impl Into<String>) -> Self {
        let transcript = transcript.into();
        let word_count = transcript.split_whitespace().count() as u64;
        Self {
            transcript,
            word_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchOutput {
    pub summary: String,
    pub bullets: Vec<String>,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSegment {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineOutput {
    pub hook: String,
    pub segments: Vec<OutlineSegment>,
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowNotesOutput {
    pub summary: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub start: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampOutput {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotesOutput {
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialOutput {
    pub twitter_thread: Vec<String>,
    pub linkedin_posts: Vec<String>,
    pub instagram_captions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOutput {
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}
