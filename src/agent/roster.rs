use std::path::Path;
use std::sync::Arc;

use crate::client::{AIClient, LlmError};
use crate::config::Config;
use crate::tools::{SaveToFileTool, ToolRegistry, WebSearchTool};

use super::{ChatAgent, DynAgent};

const RESEARCH_INSTRUCTION: &str = r#"You are an expert researcher.
Call the tool `web_search` with a `query` string and an optional integer `num_results` (default 3).
Return ONLY JSON with:
{"summary": "<3-5 sentence summary>", "bullets": ["key fact 1", "key fact 2"], "citations": [{"title": "...", "url": "...", "snippet": "..."}]}
Do not include extra commentary."#;

const OUTLINE_INSTRUCTION: &str = r#"You are an outline generator.
The prompt contains a transcript sample and research notes.
Return ONLY JSON structured as:
{"hook": "<one-line hook>", "segments": [{"title": "Topic 1", "summary": "..."}], "closing": "<one-line closing>"}"#;

const SHOW_NOTES_INSTRUCTION: &str = r#"You write podcast show notes.
Return ONLY JSON structured as:
{"summary": "A clear summary of the episode (200-400 words)", "bullets": ["insight 1", "insight 2", "insight 3"]}
No markdown, no extra commentary."#;

const TIMESTAMP_INSTRUCTION: &str = r#"You split a podcast episode into chapters.
Return ONLY JSON structured as:
{"chapters": [{"start": "00:00", "title": "Introduction"}]}
Use MM:SS or HH:MM:SS start times in ascending order."#;

const QUOTE_INSTRUCTION: &str = r#"Extract exactly 5 punchy quotes, each under 280 characters.
Call `save_to_file` with filename "quotes.md" and the quotes formatted as a numbered list.
Then reply with ONLY JSON: {"quotes": ["q1", "q2", "q3", "q4", "q5"]}"#;

const SOCIAL_INSTRUCTION: &str = r#"You write social media content for a podcast episode.
Return ONLY JSON structured as:
{"twitter_thread": ["1. <tweet 1>", "2. <tweet 2>"], "linkedin_posts": ["<post>"], "instagram_captions": ["<caption>"]}
Number tweets "1.", "2.", "3." and keep each tweet on one line.
LinkedIn posts are 2-4 sentences. Instagram captions include emojis and 3-6 hashtags."#;

const SEO_INSTRUCTION: &str = r#"You generate SEO metadata for a podcast episode.
Return ONLY JSON structured as:
{"title": "SEO title (<= 60 chars)", "meta_description": "150-160 chars", "keywords": ["keyword1", "keyword2"]}"#;

/// The agents a pipeline run talks to, one per generating stage.
#[derive(Clone)]
pub struct AgentRoster {
    pub research: DynAgent,
    pub outline: DynAgent,
    pub show_notes: DynAgent,
    pub timestamps: DynAgent,
    pub quotes: DynAgent,
    pub social: DynAgent,
    pub seo: DynAgent,
}

impl AgentRoster {
    /// Builds the model-backed roster. `save_to_file` writes under `output_dir`.
    pub fn from_config(config: &Config, output_dir: &Path) -> Result<Self, LlmError> {
        let client = AIClient::new(&config.llm)?;
        let build = |name: &str, instruction: &str| {
            ChatAgent::new(name, instruction, client.clone(), config.models.clone())
        };

        let search = WebSearchTool::new(&config.llm.user_agent).map_err(LlmError::Transport)?;
        let research_tools = ToolRegistry::new().with_tool(search);
        let quote_tools = ToolRegistry::new().with_tool(SaveToFileTool::new(output_dir));

        Ok(Self {
            research: Arc::new(build("ResearchAgent", RESEARCH_INSTRUCTION).with_tools(research_tools)),
            outline: Arc::new(build("OutlineAgent", OUTLINE_INSTRUCTION)),
            show_notes: Arc::new(build("ShowNotesAgent", SHOW_NOTES_INSTRUCTION)),
            timestamps: Arc::new(build("TimestampAgent", TIMESTAMP_INSTRUCTION)),
            quotes: Arc::new(build("QuoteAgent", QUOTE_INSTRUCTION).with_tools(quote_tools)),
            social: Arc::new(build("SocialMediaAgent", SOCIAL_INSTRUCTION)),
            seo: Arc::new(build("SEOAgent", SEO_INSTRUCTION)),
        })
    }

    /// Each agent's name with the tools it may call, in stage order.
    pub fn bindings(&self) -> Vec<(&str, Vec<&str>)> {
        [
            &self.research,
            &self.outline,
            &self.show_notes,
            &self.timestamps,
            &self.quotes,
            &self.social,
            &self.seo,
        ]
        .into_iter()
        .map(|agent| (agent.name(), agent.tool_names()))
        .collect()
    }
}
