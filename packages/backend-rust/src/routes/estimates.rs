use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::response::{AppError, SuccessResponse};
use crate::services::{self, ComputationFailed};
use crate::state::AppState;

fn read_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected request body");
            Err(AppError::bad_request(rejection.body_text()))
        }
    }
}

fn reject(err: ComputationFailed) -> AppError {
    tracing::warn!(operation = %err.operation, error = %err.source, "computation failed");
    AppError::from(err)
}

pub async fn difficulty(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(payload)?;
    let report = services::difficulty::estimate(&body).map_err(reject)?;
    Ok(Json(SuccessResponse::new(report)))
}

pub async fn difficulty_batch(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(payload)?;
    let reports = services::difficulty::estimate_batch(&body).map_err(reject)?;
    Ok(Json(SuccessResponse::new(reports)))
}

pub async fn timeline(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(payload)?;
    let report = services::timeline::predict(&body, state.rng_source()).map_err(reject)?;
    Ok(Json(SuccessResponse::new(report)))
}

pub async fn mistake(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(payload)?;
    let report = services::mistake::classify(&body, state.rng_source()).map_err(reject)?;
    Ok(Json(SuccessResponse::new(report)))
}
