use thiserror::Error;

use crate::client::LlmError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("Model returned no choices")]
    NoChoices,
    #[error("Agent exceeded {0} tool-call rounds without a final reply")]
    ToolLoop(usize),
}

impl AgentError {
    pub fn is_transient(&self) -> bool {
        match self {
            AgentError::Llm(err) => err.is_transient(),
            _ => false,
        }
    }
}
