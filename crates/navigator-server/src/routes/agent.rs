use axum::{extract::State, http::StatusCode, response::Html, routing::post, Form, Router};
use navigator::{
    agent::Agent,
    providers::{
        configs::{OpenAiProviderConfig, ProviderConfig, OPENAI_HOST},
        factory,
    },
    search::{SearchConfig, SearchSystem, TAVILY_API_KEY_VAR},
    systems::System,
};
use serde::Deserialize;
use tracing::info;

use crate::state::AppState;
use crate::view::{page, Notice};

/// Model pinned so answers stay deterministic and cheap
const OPENAI_MODEL: &str = "gpt-4o-mini-2024-07-18";

/// Cap on search results returned per query
const SEARCH_MAX_RESULTS: u32 = 2;

#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    #[serde(default)]
    openai_api_key: String,
    #[serde(default)]
    tavily_api_key: String,
}

async fn initialize(
    State(state): State<AppState>,
    Form(request): Form<InitializeRequest>,
) -> Result<Html<String>, StatusCode> {
    if request.openai_api_key.is_empty() || request.tavily_api_key.is_empty() {
        let ready = state.agent.lock().await.is_some();
        return page(
            ready,
            Some(Notice::error(
                "Please provide both OpenAI and Tavily API keys.",
            )),
            None,
        );
    }

    // The search system authenticates through the environment
    std::env::set_var(TAVILY_API_KEY_VAR, &request.tavily_api_key);

    let provider = factory::get_provider(ProviderConfig::OpenAi(OpenAiProviderConfig {
        host: OPENAI_HOST.to_string(),
        api_key: request.openai_api_key,
        model: OPENAI_MODEL.to_string(),
        temperature: Some(0.0),
        max_tokens: None,
    }))
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let search = SearchSystem::new(SearchConfig {
        max_results: SEARCH_MAX_RESULTS,
        ..SearchConfig::default()
    })
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut agent = Agent::new(provider);
    agent.add_system(Box::new(search));

    for system in agent.systems() {
        info!("system loaded: {} ({})", system.name(), system.description());
    }

    // Replace whatever agent was there before, conversation memory included
    *state.agent.lock().await = Some(agent);
    info!(model = OPENAI_MODEL, "agent initialized");

    page(
        true,
        Some(Notice::success("Alpha Navigator is initialized and ready!")),
        None,
    )
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/agent", post(initialize))
        .with_state(state)
}
