// ============================================================================
// HTTP Routes — POST /tweet, DELETE /tweet/{id}
// ============================================================================
// Each inbound request turns into exactly one signed upstream call whose
// status and body are relayed back unchanged.
// ============================================================================

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Router,
};
use relay_core::executor::is_valid_tweet_id;
use relay_core::{RelayError, TweetApi, TweetRequest, UpstreamResponse};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared, read-only state for all handlers
pub struct AppState {
    pub api: Arc<dyn TweetApi>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tweet", post(post_tweet).fallback(method_not_allowed))
        .route(
            "/tweet/{id}",
            delete(delete_tweet).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /tweet
async fn post_tweet(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: TweetRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected tweet body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", e),
            )
                .into_response();
        }
    };

    info!("POST /tweet");
    match state.api.post_tweet(&request.message).await {
        Ok(upstream) => relay(upstream),
        Err(e) => error_response(e),
    }
}

/// DELETE /tweet/{id}
async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    Path(tweet_id): Path<String>,
) -> Response {
    if !is_valid_tweet_id(&tweet_id) {
        warn!("Rejected tweet id {:?}", tweet_id);
        return (StatusCode::BAD_REQUEST, "Invalid tweet id").into_response();
    }

    info!("DELETE /tweet/{}", tweet_id);
    match state.api.delete_tweet(&tweet_id).await {
        Ok(upstream) => relay(upstream),
        Err(e) => error_response(e),
    }
}

async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Invalid request method {}", method),
    )
        .into_response()
}

fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

fn error_response(err: RelayError) -> Response {
    error!("Relay failed: {}", err);

    let status = if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, format!("Error found: {}", err)).into_response()
}
