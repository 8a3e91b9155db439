use std::sync::{Mutex, MutexGuard};

use crate::client::ChatMessage;

/// Conversation history shared by every agent in one run.
///
/// Parallel-phase agents append concurrently, so the history sits behind a
/// mutex. The lock is never held across an await point.
#[derive(Debug)]
pub struct AgentSession {
    id: String,
    messages: Mutex<Vec<ChatMessage>>,
}

impl AgentSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Appends one prompt/reply exchange.
    pub fn record(&self, prompt: &str, reply: &str) {
        let mut messages = self.lock();
        messages.push(ChatMessage::user(prompt));
        messages.push(ChatMessage::assistant(reply));
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
