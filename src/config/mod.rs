//! Configuration for the podcast automator.
//!
//! Settings are layered the same way for every run:
//! - built-in defaults
//! - the JSON file at `~/.podcast-automator/config`
//! - environment variable overrides
//! - validation of required settings

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

#[allow(unused_imports)]
pub use builder::ConfigBuilder;
#[allow(unused_imports)]
pub use constants::{DEFAULT_CEREBRAS_BASE_URL, DEFAULT_OPENAI_BASE_URL};
#[allow(unused_imports)]
pub use types::{
    Config, InputSettings, LlmProvider, LlmSettings, ModelSettings, PipelineSettings,
    TranscriptionSettings,
};
