use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::structured::Citation;

use super::{Tool, ToolResult};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const SEARCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NUM_RESULTS: usize = 3;

/// Web search over the DuckDuckGo HTML endpoint.
pub struct WebSearchTool {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    num_results: Option<usize>,
}

impl WebSearchTool {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(DEFAULT_SEARCH_ENDPOINT, user_agent)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<String, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web and return result titles, URLs and snippets."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string"},
                "num_results": {"type": "integer", "default": DEFAULT_NUM_RESULTS}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> ToolResult {
        let args: SearchArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(err) => return ToolResult::failure(format!("Search failed: {err}")),
        };
        let limit = args.num_results.unwrap_or(DEFAULT_NUM_RESULTS).max(1);

        let html = match self.fetch(&args.query).await {
            Ok(html) => html,
            Err(err) => {
                warn!(query = %args.query, error = %err, "web search request failed");
                return ToolResult::failure(format!("Search failed: {err}"));
            }
        };

        let results = parse_results(&html, limit);
        if results.is_empty() {
            return ToolResult::failure("No search results found.");
        }

        let count = results.len();
        ToolResult::success(json!(results))
            .with_meta("query", args.query)
            .with_meta("num_results", count)
    }
}

/// Pull up to `limit` results out of a DuckDuckGo HTML result page.
pub(crate) fn parse_results(html: &str, limit: usize) -> Vec<Citation> {
    let (Some(result_body), Some(title_anchor), Some(snippet)) = (
        selector(".result__body"),
        selector("a.result__a"),
        selector(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&result_body)
        .take(limit)
        .map(|result| {
            let anchor = result.select(&title_anchor).next();
            Citation {
                title: anchor.map(text_of).unwrap_or_default(),
                url: anchor
                    .and_then(|anchor| anchor.value().attr("href"))
                    .unwrap_or_default()
                    .to_string(),
                snippet: result.select(&snippet).next().map(text_of).unwrap_or_default(),
            }
        })
        .collect()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Decoded text of an element with whitespace runs collapsed.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
