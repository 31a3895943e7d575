mod estimates;
mod health;

use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use crate::config::Config;
use crate::response::AppError;
use crate::state::AppState;

const DEFAULT_HEALTH_PATH: &str = "/health";
const API_PREFIX: &str = "/api";

pub fn router(state: AppState, config: &Config) -> Router {
    let mut app = Router::new()
        .route(
            "/api/v1/difficulty",
            post(estimates::difficulty).fallback(fallback_handler),
        )
        .route(
            "/api/v1/difficulty/batch",
            post(estimates::difficulty_batch).fallback(fallback_handler),
        )
        .route(
            "/api/v1/timeline",
            post(estimates::timeline).fallback(fallback_handler),
        )
        .route(
            "/api/v1/mistake",
            post(estimates::mistake).fallback(fallback_handler),
        );

    for path in health_paths(&config.healthcheck_endpoint) {
        app = app.nest(path.as_str(), health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

/// `/health` always; the configured endpoint too unless it would overlap
/// an existing route tree
fn health_paths(endpoint: &str) -> Vec<String> {
    let mut paths = vec![DEFAULT_HEALTH_PATH.to_string()];
    let overlaps = [DEFAULT_HEALTH_PATH, API_PREFIX]
        .iter()
        .any(|taken| is_same_tree(endpoint, taken));
    if !overlaps {
        paths.push(endpoint.to_string());
    }
    paths
}

fn is_same_tree(a: &str, b: &str) -> bool {
    a == "/"
        || a == b
        || a.starts_with(&format!("{b}/"))
        || b.starts_with(&format!("{a}/"))
}

async fn fallback_handler() -> Response {
    AppError::not_found("接口不存在").into_response()
}
