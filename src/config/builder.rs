use anyhow::Result;

use super::types::{
    Config, InputSettings, LlmSettings, ModelSettings, PipelineSettings, TranscriptionSettings,
};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) models: ModelSettings,
    pub(super) pipeline: PipelineSettings,
    pub(super) inputs: InputSettings,
    pub(super) transcription: TranscriptionSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            pipeline: PipelineSettings::default(),
            inputs: InputSettings::default(),
            transcription: TranscriptionSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_pipeline<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut PipelineSettings),
    {
        update(&mut self.pipeline);
        self
    }

    pub fn with_inputs<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut InputSettings),
    {
        update(&mut self.inputs);
        self
    }

    pub fn with_transcription<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut TranscriptionSettings),
    {
        update(&mut self.transcription);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            models: self.models,
            pipeline: self.pipeline,
            inputs: self.inputs,
            transcription: self.transcription,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
