use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use vitalwatch::risk::{
    risk_router, NotificationPublisher, ProfileRepository, RiskAssessmentService,
};

pub(crate) fn with_risk_routes<R, N>(service: Arc<RiskAssessmentService<R, N>>) -> axum::Router
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    risk_router(service)
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
    use crate::infra::{seed_profiles, InMemoryNotificationPublisher, InMemoryProfileRepository};
    use axum::http::StatusCode;
    use tower::ServiceExt;
    use vitalwatch::risk::RiskEngine;

    fn seeded_router() -> axum::Router {
        let repository = Arc::new(InMemoryProfileRepository::default());
        for profile in seed_profiles() {
            repository
                .insert_profile(profile)
                .expect("seed profiles insert");
        }
        let service = Arc::new(RiskAssessmentService::new(
            repository,
            Arc::new(InMemoryNotificationPublisher::default()),
            RiskEngine::default(),
        ));
        with_risk_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status"), Some(&json!("ok")));
    }

    #[tokio::test]
    async fn seeded_profiles_are_reachable() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::get("/api/v1/persons/demo_sarah")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn personalize_works_end_to_end_with_seeded_data() {
        let router = seeded_router();

        let payload = json!({
            "person_id": "demo_maria",
            "alert": {
                "alert_id": "alert-dengue-sp",
                "title": "Dengue outbreak in São Paulo",
                "disease": "dengue",
                "location": "São Paulo, Brazil",
                "severity": "outbreak",
                "mortality_rate": 0.6,
                "source": "ProMED",
                "published_at": "2026-08-01T09:00:00Z"
            }
        });

        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/personalize")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&payload).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(
            value.get("risk_level").and_then(serde_json::Value::as_str),
            Some("high")
        );
    }
}
