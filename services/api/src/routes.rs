use crate::infra::{AppState, ProgramServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use pmajay_gia::programs::{
    analytics_router, audit_router, beneficiary_router, project_router, training_router,
};
use serde_json::json;

pub(crate) fn with_program_routes(services: &ProgramServices) -> Router {
    Router::new()
        .merge(beneficiary_router(services.beneficiaries.clone()))
        .merge(project_router(services.projects.clone()))
        .merge(training_router(services.training.clone()))
        .merge(analytics_router(services.analytics.clone()))
        .merge(audit_router(services.audit.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
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
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pmajay_gia::config::ProgramConfig;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool, config: &ProgramConfig) -> Router {
        let services = ProgramServices::in_memory(config).expect("services build");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_program_routes(&services).layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn health_reports_timestamp() {
        let response = app(true, &ProgramConfig::default())
            .oneshot(get_request("/health"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let response = app(false, &ProgramConfig::default())
            .oneshot(get_request("/ready"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true, &ProgramConfig::default())
            .oneshot(get_request("/ready"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn catalog_seeding_follows_config() {
        let seeded = json_body(
            app(true, &ProgramConfig::default())
                .oneshot(get_request("/api/skills"))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(seeded.as_array().expect("array").len(), 8);

        let unseeded = json_body(
            app(
                true,
                &ProgramConfig {
                    seed_catalog: false,
                    ..ProgramConfig::default()
                },
            )
            .oneshot(get_request("/api/skills"))
            .await
            .expect("response"),
        )
        .await;
        assert!(unseeded.as_array().expect("array").is_empty());
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_text() {
        let response = app(true, &ProgramConfig::default())
            .oneshot(get_request("/metrics"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn dashboard_is_mounted() {
        let response = app(true, &ProgramConfig::default())
            .oneshot(get_request("/api/dashboard/stats"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
