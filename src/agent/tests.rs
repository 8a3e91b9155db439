use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use crate::client::{AIClient, ChatMessageRole, LlmError};
use crate::config::{Config, LlmProvider, LlmSettings, ModelSettings};
use crate::tools::{SaveToFileTool, ToolRegistry};

use super::{Agent, AgentError, AgentRoster, AgentSession, ChatAgent};

fn llm_settings(base_url: String) -> LlmSettings {
    LlmSettings {
        provider: LlmProvider::OpenRouter,
        api_key: "test-key".to_string(),
        timeout_secs: 5,
        base_url,
        user_agent: "podcast-automator/test".to_string(),
    }
}

fn model_settings() -> ModelSettings {
    ModelSettings {
        name: "test/model".to_string(),
        max_tokens: 256,
        temperature: 0.2,
    }
}

fn agent_for(server: &MockServer, name: &str) -> ChatAgent {
    let client = AIClient::new(&llm_settings(server.url("/v1"))).unwrap();
    ChatAgent::new(name, "Return ONLY JSON.", client, model_settings())
}

#[tokio::test]
async fn chat_agent_returns_reply_and_records_exchange() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("Authorization", "Bearer test-key")
                .body_contains("Research AI in Healthcare");
            then.status(200).json_body(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Here you go: {\"summary\": \"s\"}"},
                    "finish_reason": "stop"
                }]
            }));
        })
        .await;

    let agent = agent_for(&server, "ResearchAgent");
    let session = AgentSession::new("pod_test");
    let reply = agent
        .generate(&session, "Research AI in Healthcare")
        .await
        .unwrap();

    assert_eq!(reply, "Here you go: {\"summary\": \"s\"}");
    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatMessageRole::User);
    assert_eq!(history[1].content.as_deref(), Some(reply.as_str()));
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_agent_sends_prior_session_history() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("earlier prompt")
                .body_contains("earlier reply");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "{}"}, "finish_reason": "stop"}]
            }));
        })
        .await;

    let session = AgentSession::new("pod_test");
    session.record("earlier prompt", "earlier reply");

    let agent = agent_for(&server, "OutlineAgent");
    agent.generate(&session, "next prompt").await.unwrap();

    assert_eq!(session.len(), 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_agent_executes_tool_calls_and_concatenates_text() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    // Registered first so the follow-up request carrying the tool result wins.
    let follow_up = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("\"role\":\"tool\"");
            then.status(200).json_body(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "{\"quotes\": [\"hello\"]}"},
                    "finish_reason": "stop"
                }]
            }));
        })
        .await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "Saving quotes. ",
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "save_to_file",
                                "arguments": "{\"filename\": \"quotes.md\", \"content\": \"1. hello\"}"
                            }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            }));
        })
        .await;

    let agent = agent_for(&server, "QuoteAgent")
        .with_tools(ToolRegistry::new().with_tool(SaveToFileTool::new(dir.path())));
    let session = AgentSession::new("pod_test");
    let reply = agent.generate(&session, "Extract quotes").await.unwrap();

    assert_eq!(reply, "Saving quotes. {\"quotes\": [\"hello\"]}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("quotes.md")).unwrap(),
        "1. hello"
    );
    first.assert_async().await;
    follow_up.assert_async().await;
}

#[tokio::test]
async fn rate_limit_maps_to_transient_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body("Rate limit exceeded: too many requests per second");
        })
        .await;

    let agent = agent_for(&server, "SEOAgent");
    let err = agent
        .generate(&AgentSession::new("pod_test"), "seo please")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Llm(LlmError::RateLimited(_))));
    assert!(err.is_transient());
}

#[tokio::test]
async fn quota_exhaustion_maps_to_transient_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(403)
                .body("{\"error\": {\"status\": \"RESOURCE_EXHAUSTED\"}}");
        })
        .await;

    let agent = agent_for(&server, "SEOAgent");
    let err = agent
        .generate(&AgentSession::new("pod_test"), "seo please")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Llm(LlmError::QuotaExhausted(_))));
    assert!(err.is_transient());
}

#[tokio::test]
async fn quota_message_in_bad_request_is_transient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(400)
                .body("{\"error\": {\"message\": \"You exceeded your current quota\"}}");
        })
        .await;

    let agent = agent_for(&server, "SEOAgent");
    let err = agent
        .generate(&AgentSession::new("pod_test"), "seo please")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Llm(LlmError::QuotaExhausted(_))));
    assert!(err.is_transient());
}

#[tokio::test]
async fn plain_bad_request_is_permanent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(400).body("messages must not be empty");
        })
        .await;

    let agent = agent_for(&server, "SEOAgent");
    let err = agent
        .generate(&AgentSession::new("pod_test"), "seo please")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Llm(LlmError::BadRequest(_))));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn unauthorized_is_permanent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("bad key");
        })
        .await;

    let agent = agent_for(&server, "SEOAgent");
    let session = AgentSession::new("pod_test");
    let err = agent.generate(&session, "seo please").await.unwrap_err();

    assert!(matches!(err, AgentError::Llm(LlmError::Unauthorized)));
    assert!(!err.is_transient());
    assert!(session.is_empty());
}

#[tokio::test]
async fn roster_builds_named_agents_with_tools() {
    let dir = TempDir::new().unwrap();
    let config = Config::builder()
        .with_llm(|llm| llm.api_key = "test-key".to_string())
        .build()
        .unwrap();

    let roster = AgentRoster::from_config(&config, dir.path()).unwrap();
    let none: Vec<&str> = Vec::new();
    assert_eq!(
        roster.bindings(),
        [
            ("ResearchAgent", vec!["web_search"]),
            ("OutlineAgent", none.clone()),
            ("ShowNotesAgent", none.clone()),
            ("TimestampAgent", none.clone()),
            ("QuoteAgent", vec!["save_to_file"]),
            ("SocialMediaAgent", none.clone()),
            ("SEOAgent", none),
        ]
    );
}
