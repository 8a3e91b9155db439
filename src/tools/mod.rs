//! Side-effecting tools agents may call mid-generation.
//!
//! Every tool reports through [`ToolResult`]; a failed tool is data handed back
//! to the model, not an error that aborts the agent call.

mod registry;
mod result;
mod save_file;
mod search;
mod transcribe;

#[allow(unused_imports)]
pub use registry::{Tool, ToolRegistry};
#[allow(unused_imports)]
pub use result::ToolResult;
#[allow(unused_imports)]
pub use save_file::SaveToFileTool;
#[allow(unused_imports)]
pub use search::WebSearchTool;
#[allow(unused_imports)]
pub use transcribe::{Transcriber, WhisperTranscriber};
