//! Structured output handling for free-form agent responses.
//!
//! Agents answer in prose that is expected to carry exactly one JSON object.
//! [`extract_json_object`] locates and parses it, and a [`Shape`] checks the
//! parsed object against the typed payload a stage expects.

mod extract;
mod schemas;
mod shape;

#[allow(unused_imports)]
pub use extract::{ExtractError, extract_json_object};
#[allow(unused_imports)]
pub use schemas::{
    Chapter, Citation, OutlineOutput, OutlineSegment, QuotesOutput, ResearchOutput, SeoOutput,
    ShowNotesOutput, SocialOutput, TimestampOutput, TranscriptionOutput,
};
#[allow(unused_imports)]
pub use shape::{Shape, ShapeError};
