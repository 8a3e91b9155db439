use std::collections::BTreeMap;

use chrono::Local;
use serde::Serialize;
use serde_json::Value;

/// Preview length kept per history entry.
pub const PREVIEW_CHARS: usize = 120;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub agent: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub data: BTreeMap<String, Value>,
    pub history: Vec<HistoryEntry>,
}

/// Cross-stage state for one pipeline run.
///
/// Only the orchestrator mutates the store, and only outside the parallel
/// phase, so it carries no lock.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    id: String,
    data: BTreeMap<String, Value>,
    history: Vec<HistoryEntry>,
}

impl SessionStore {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn log_step(&mut self, agent: impl Into<String>, output: &str) {
        self.history.push(HistoryEntry {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            agent: agent.into(),
            preview: preview(output),
        });
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            data: self.data.clone(),
            history: self.history.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.history.clear();
    }
}

fn preview(output: &str) -> String {
    let mut chars = output.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}
