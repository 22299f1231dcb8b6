use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use super::ports::{ArtifactStore, ContactStore, Notifier};
use super::service::{GapScanService, ServiceError};
use crate::error::AppError;

/// Router exposing the quiz and scan pipelines over HTTP.
pub fn intake_router<C, A, N>(service: Arc<GapScanService<C, A, N>>) -> Router
where
    C: ContactStore + 'static,
    A: ArtifactStore + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/quiz", post(quiz_handler::<C, A, N>))
        .route("/api/v1/scan", post(scan_handler::<C, A, N>))
        .with_state(service)
}

pub(crate) async fn quiz_handler<C, A, N>(
    State(service): State<Arc<GapScanService<C, A, N>>>,
    Json(payload): Json<Value>,
) -> Response
where
    C: ContactStore + 'static,
    A: ArtifactStore + 'static,
    N: Notifier + 'static,
{
    match service.diagnose_value(&payload) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(ServiceError::Input(error)) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn scan_handler<C, A, N>(
    State(service): State<Arc<GapScanService<C, A, N>>>,
    Json(payload): Json<Value>,
) -> Response
where
    C: ContactStore + 'static,
    A: ArtifactStore + 'static,
    N: Notifier + 'static,
{
    match service.plan_value(&payload) {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(ServiceError::Input(error)) => AppError::from(error).into_response(),
    }
}
