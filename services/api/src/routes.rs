use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mindthegaps::workflows::intake::{
    intake_router, ArtifactStore, ContactStore, GapScanService, Notifier,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_intake_routes<C, A, N>(service: Arc<GapScanService<C, A, N>>) -> axum::Router
where
    C: ContactStore + 'static,
    A: ArtifactStore + 'static,
    N: Notifier + 'static,
{
    intake_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryArtifactStore, InMemoryContactStore, LoggingNotifier};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use mindthegaps::workflows::EngineThresholds;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct Harness {
        app: axum::Router,
        artifacts: Arc<InMemoryArtifactStore>,
        notifier: Arc<LoggingNotifier>,
    }

    fn harness(ready: bool) -> Harness {
        let artifacts = Arc::new(InMemoryArtifactStore::default());
        let notifier = Arc::new(LoggingNotifier::default());
        let service = Arc::new(GapScanService::new(
            Arc::new(InMemoryContactStore::default()),
            artifacts.clone(),
            notifier.clone(),
            EngineThresholds::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        Harness {
            app: with_intake_routes(service).layer(Extension(state)),
            artifacts,
            notifier,
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = harness(true)
            .app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let response = harness(false)
            .app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = harness(true)
            .app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stopped_scan_is_announced_through_the_notifier() {
        let Harness {
            app,
            artifacts,
            notifier,
        } = harness(true);
        let body = json!({
            "confirmed_pillar": "Acquisition",
            "quiz_pillar": "Conversion",
            "sub_path": "Other (manual)",
            "contact": {"email": "owner@example.com"}
        });

        let response = app
            .oneshot(
                Request::post("/api/v1/scan")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["outcome"]["status"], "stopped");
        assert_eq!(
            payload["outcome"]["stop"]["details"]
                .as_array()
                .map(Vec::len),
            Some(3)
        );
        assert_eq!(artifacts.len(), 0);
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "scan_stopped");
        assert_eq!(sent[0].email.as_deref(), Some("owner@example.com"));
    }
}
