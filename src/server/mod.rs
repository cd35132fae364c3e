use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::summarize::Summarizer;
use crate::transcript::{ResolveError, TranscriptResolver};

/// Shared state for the HTTP handlers
pub struct AppState {
    pub resolver: TranscriptResolver,
    pub summarizer: Arc<dyn Summarizer>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    url: Option<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/summarize", post(summarize_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server (blocks until shutdown)
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> crate::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr, "HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Browser form page
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// Liveness probe
async fn health_handler() -> &'static str {
    "ok"
}

/// `POST /api/summarize` — resolve a transcript for the submitted URL and
/// summarize it. The single point where resolver and backend outcomes are
/// translated into status codes and user-facing messages.
async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Response {
    let url = match request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
    {
        Some(url) => url.to_string(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "URL이 필요합니다" })),
            )
                .into_response();
        }
    };

    let transcript = match state.resolver.resolve(&url).await {
        Ok(text) => text,
        Err(err) => {
            if let ResolveError::Exhausted { attempts } = &err {
                info!(url = %url, ?attempts, "transcript unavailable");
            }
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": err.to_string() })),
            )
                .into_response();
        }
    };

    match state.summarizer.summarize(&transcript).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "summary": summary,
                "method": "transcript",
            })),
        )
            .into_response(),
        Err(err) => {
            // Backend details stay in the log, never in the response body
            error!(url = %url, error = %err, "summary generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "요약 생성에 실패했습니다" })),
            )
                .into_response()
        }
    }
}
