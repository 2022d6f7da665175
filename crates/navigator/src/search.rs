use anyhow::Result as AnyhowResult;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};
use crate::systems::System;

/// Default host for the Tavily search API
pub const TAVILY_HOST: &str = "https://api.tavily.com";

/// Environment variable carrying the search credential. It is written at
/// agent initialization and read back on every search call.
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub host: String,
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: TAVILY_HOST.to_string(),
            max_results: 5,
        }
    }
}

/// System exposing one web search tool backed by the Tavily API
pub struct SearchSystem {
    tools: Vec<Tool>,
    client: Client,
    config: SearchConfig,
}

impl SearchSystem {
    pub fn new(config: SearchConfig) -> AnyhowResult<Self> {
        let search_tool = Tool::new(
            "web_search",
            "Search the web for current information such as prices, schedules and \
             availability. Returns a JSON list of results with title, url and content.",
            json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query."
                    }
                }
            }),
        );

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            tools: vec![search_tool],
            client,
            config,
        })
    }

    async fn web_search(&self, arguments: Value) -> AgentResult<Vec<Content>> {
        let query = arguments
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AgentError::InvalidParameters("The 'query' parameter is required".into())
            })?;

        let api_key = std::env::var(TAVILY_API_KEY_VAR).map_err(|_| {
            AgentError::ExecutionError(format!("{} is not set", TAVILY_API_KEY_VAR))
        })?;

        let url = format!("{}/search", self.config.host.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "api_key": api_key,
                "query": query,
                "max_results": self.config.max_results,
            }))
            .send()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("Search request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json().await.map_err(|e| {
                    AgentError::ExecutionError(format!("Malformed search response: {}", e))
                })?;
                let results = body.get("results").cloned().unwrap_or_else(|| json!([]));
                Ok(vec![Content::text(results.to_string())])
            }
            status => Err(AgentError::ExecutionError(format!(
                "Search request failed: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl System for SearchSystem {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Web search over the Tavily API"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        match tool_call.name.as_str() {
            "web_search" => self.web_search(tool_call.arguments).await,
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}
