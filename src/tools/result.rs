use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a tool call: `data` is meaningful when `ok`, `error` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub ok: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl ToolResult {
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            ok: true,
            data: Some(data.into()),
            error: None,
            meta: Map::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
            meta: Map::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// The payload when the call succeeded, otherwise the recorded error.
    pub fn into_result(self) -> Result<Value, String> {
        if self.ok {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "unknown tool error".to_string()))
        }
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"ok":false,"data":null,"error":"unserializable tool result: {err}","meta":{{}}}}"#)
        })
    }
}
