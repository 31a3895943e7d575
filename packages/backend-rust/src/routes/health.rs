use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "mentor-backend";
/// Share of the configured RSS budget above which the process reports unhealthy
const MEMORY_THRESHOLD: f64 = 0.9;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
        .route("/info", get(info))
}

async fn root() -> Response {
    let response = HealthResponse {
        status: "ok",
        timestamp: now_iso(),
    };
    Json(response).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    let memory_healthy = match state.memory_limit_bytes() {
        Some(limit) => memory_within_limit(read_rss_bytes(), limit),
        None => true,
    };
    let status = if memory_healthy { "healthy" } else { "unhealthy" };

    let response = LivenessResponse {
        status,
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
        version: env_or("APP_VERSION", "unknown"),
        checks: LivenessChecks {
            process: true,
            memory: memory_healthy,
        },
    };

    let status_code = if memory_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response)).into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    let response = HealthInfoResponse {
        service: SERVICE_NAME,
        version: env_or("APP_VERSION", "unknown"),
        environment: env_or("APP_ENV", "development"),
        estimator_mode: if state.rng_source().is_deterministic() {
            "seeded"
        } else {
            "entropy"
        },
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    };

    Json(response).into_response()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn memory_within_limit(rss: Option<u64>, limit: u64) -> bool {
    match rss {
        Some(rss) => (rss as f64) / (limit as f64) < MEMORY_THRESHOLD,
        None => true,
    }
}

fn read_rss_bytes() -> Option<u64> {
    read_proc_self_status_kb("VmRSS").map(|kb| kb * 1024)
}

fn read_proc_self_status_kb(prefix: &str) -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with(prefix) {
            continue;
        }
        let value = trimmed.split_whitespace().nth(1)?;
        return value.parse().ok();
    }
    None
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct LivenessChecks {
    process: bool,
    memory: bool,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
    version: String,
    checks: LivenessChecks,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: String,
    environment: String,
    estimator_mode: &'static str,
    start_time: String,
    uptime: u64,
}
