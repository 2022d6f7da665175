use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};

use crate::state::AppState;
use crate::view::page;

async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let ready = state.agent.lock().await.is_some();
    page(ready, None, None)
}

pub fn routes(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_renders_form() {
        let app = routes(AppState::default());

        let request = Request::builder()
            .uri("/")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Alpha Navigator"));
        assert!(body.contains("Initialize Agent"));
        // Send stays disabled until an agent is initialized
        assert!(body.contains(r#"type="submit" disabled"#));
    }
}
