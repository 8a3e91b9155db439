use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, ToolResult};

/// Writes agent-provided text into the output directory.
pub struct SaveToFileTool {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SaveArgs {
    filename: String,
    #[serde(default)]
    content: Option<String>,
}

impl SaveToFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let relative = Path::new(filename);
        let confined = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if filename.trim().is_empty() || !confined {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl Tool for SaveToFileTool {
    fn name(&self) -> &str {
        "save_to_file"
    }

    fn description(&self) -> &str {
        "Save text content to a file in the episode output directory."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": {"type": "string", "description": "Relative file name, e.g. quotes.md"},
                "content": {"type": "string", "description": "Full file content"}
            },
            "required": ["filename", "content"]
        })
    }

    async fn execute(&self, args: Value) -> ToolResult {
        let args: SaveArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(_) => return ToolResult::failure("Invalid filename argument."),
        };

        let Some(path) = self.resolve(&args.filename) else {
            return ToolResult::failure("Invalid filename argument.");
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                return ToolResult::failure(format!("Error saving file: {err}"));
            }
        }

        match tokio::fs::write(&path, args.content.unwrap_or_default()).await {
            Ok(()) => ToolResult::success(json!({"path": path.display().to_string()}))
                .with_meta("filename", args.filename),
            Err(err) => ToolResult::failure(format!("Error saving file: {err}")),
        }
    }
}
