use std::sync::Arc;

use async_trait::async_trait;

use super::{AgentError, AgentSession};

/// A named generation capability.
///
/// An agent may call any of its tools before replying and may wrap its JSON
/// payload in arbitrary prose; callers extract the payload themselves.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Names of the tools this agent may call.
    fn tool_names(&self) -> Vec<&str> {
        Vec::new()
    }

    async fn generate(&self, session: &AgentSession, prompt: &str) -> Result<String, AgentError>;
}

pub type DynAgent = Arc<dyn Agent>;
