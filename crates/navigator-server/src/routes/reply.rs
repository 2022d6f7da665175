use axum::{extract::State, http::StatusCode, response::Html, routing::post, Form, Router};
use futures::TryStreamExt;
use indoc::indoc;
use navigator::models::message::Message;
use serde::Deserialize;
use tracing::error;

use crate::state::AppState;
use crate::view::{page, Notice};

/// All turns in a process share this one thread in the conversation store
const THREAD_ID: &str = "web_demo";

const TRAVEL_INSTRUCTIONS: &str = indoc! {r#"
    You are a helpful travel agent. You can answer questions related to flights, hotels, destination recommendations, visas, and other travel planning topics.
    If the user asks a question NOT related to travel, respond with: "I don't know.""#};

const NO_MESSAGES_REPLY: &str = "(No messages in response)";
const NO_CONTENT_REPLY: &str = "(No content in final message)";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    question: String,
}

/// Pull the displayable text out of a turn's collected messages
fn extract_reply(messages: &[Message]) -> String {
    let Some(last) = messages.last() else {
        return NO_MESSAGES_REPLY.to_string();
    };

    let texts: Vec<&str> = last
        .content
        .iter()
        .filter_map(|content| content.as_text())
        .collect();

    if texts.is_empty() {
        NO_CONTENT_REPLY.to_string()
    } else {
        texts.join("\n")
    }
}

async fn send(
    State(state): State<AppState>,
    Form(request): Form<AskRequest>,
) -> Result<Html<String>, StatusCode> {
    let question = request.question.trim();

    let guard = state.agent.lock().await;
    let ready = guard.is_some();

    if question.is_empty() {
        return page(ready, Some(Notice::warning("Please enter a question.")), None);
    }

    let Some(agent) = guard.as_ref() else {
        return page(
            false,
            Some(Notice::error("Please initialize the agent first.")),
            None,
        );
    };

    let messages = vec![Message::user().with_text(question)];
    let mut stream = agent
        .reply(TRAVEL_INSTRUCTIONS, &messages, THREAD_ID)
        .await
        .map_err(|e| {
            error!("failed to start reply: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let mut replies = Vec::new();
    loop {
        match stream.try_next().await {
            Ok(Some(message)) => replies.push(message),
            Ok(None) => break,
            Err(e) => {
                error!("reply failed: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
    drop(stream);

    page(true, None, Some(extract_reply(&replies)))
}

pub fn routes(state: AppState) -> Router {
    Router::new().route("/reply", post(send)).with_state(state)
}
