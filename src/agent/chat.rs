use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{AIClient, ChatCompletionRequest, ChatMessage, ToolSpec};
use crate::config::ModelSettings;
use crate::tools::{ToolRegistry, ToolResult};

use super::{Agent, AgentError, AgentSession};

/// Upper bound on model round-trips spent answering tool calls.
pub const MAX_TOOL_ROUNDS: usize = 8;

/// Agent backed by an OpenAI-compatible chat-completions endpoint.
pub struct ChatAgent {
    name: String,
    instruction: String,
    tools: ToolRegistry,
    client: AIClient,
    model: ModelSettings,
}

impl ChatAgent {
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        client: AIClient,
        model: ModelSettings,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            tools: ToolRegistry::new(),
            client,
            model,
        }
    }

    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools
            .tools()
            .map(|tool| ToolSpec::function(tool.name(), tool.description(), tool.parameters_schema()))
            .collect()
    }

    async fn run_tool(&self, name: &str, raw_arguments: &str) -> ToolResult {
        let arguments = if raw_arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str::<Value>(raw_arguments) {
                Ok(value) => value,
                Err(err) => {
                    warn!(agent = %self.name, tool = name, "tool arguments are not valid JSON");
                    return ToolResult::failure(format!("Invalid tool arguments: {err}"));
                }
            }
        };
        self.tools.execute(name, arguments).await
    }
}

#[async_trait]
impl Agent for ChatAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn tool_names(&self) -> Vec<&str> {
        self.tools.names()
    }

    async fn generate(&self, session: &AgentSession, prompt: &str) -> Result<String, AgentError> {
        let mut messages = vec![ChatMessage::system(&self.instruction)];
        messages.extend(session.history());
        messages.push(ChatMessage::user(prompt));

        let tools = self.tool_specs();
        let mut fragments: Vec<String> = Vec::new();

        for round in 0..MAX_TOOL_ROUNDS {
            let request = ChatCompletionRequest {
                model: self.model.name.clone(),
                messages: messages.clone(),
                max_tokens: Some(self.model.max_tokens),
                temperature: Some(self.model.temperature),
                tools: tools.clone(),
            };

            let response = self.client.chat_completion(request).await?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or(AgentError::NoChoices)?;
            debug!(agent = %self.name, round, finish_reason = ?choice.finish_reason, "model replied");
            let message = choice.message;

            if let Some(text) = message.content.as_deref().filter(|text| !text.is_empty()) {
                fragments.push(text.to_string());
            }

            if message.tool_calls.is_empty() {
                let reply = fragments.concat();
                session.record(prompt, &reply);
                return Ok(reply);
            }

            debug!(
                agent = %self.name,
                round,
                calls = message.tool_calls.len(),
                "model requested tool calls"
            );
            let calls = message.tool_calls.clone();
            messages.push(message);
            for call in calls {
                let result = self.run_tool(&call.function.name, &call.function.arguments).await;
                messages.push(ChatMessage::tool(call.id, result.to_json_string()));
            }
        }

        Err(AgentError::ToolLoop(MAX_TOOL_ROUNDS))
    }
}
