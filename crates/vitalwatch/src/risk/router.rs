use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Alert, AlertId, FeedbackKind, PersonId, PersonProfile};
use super::repository::{NotificationPublisher, ProfileRepository, RepositoryError};
use super::service::{RiskAssessmentService, ServiceError};

/// Router builder exposing the personalization, profile, and feedback
/// endpoints.
pub fn risk_router<R, N>(service: Arc<RiskAssessmentService<R, N>>) -> Router
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/personalize", post(personalize_handler::<R, N>))
        .route(
            "/api/v1/persons",
            post(register_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route("/api/v1/persons/:person_id", get(profile_handler::<R, N>))
        .route("/api/v1/feedback", post(feedback_handler::<R, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonalizeRequest {
    pub(crate) person_id: String,
    pub(crate) alert: Alert,
    /// Overrides the evaluation instant; omitted in production traffic.
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackRequest {
    pub(crate) person_id: String,
    pub(crate) alert_id: String,
    pub(crate) feedback_type: FeedbackKind,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

pub(crate) async fn personalize_handler<R, N>(
    State(service): State<Arc<RiskAssessmentService<R, N>>>,
    axum::Json(request): axum::Json<PersonalizeRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let person_id = PersonId(request.person_id);
    match service.assess(&person_id, &request.alert, request.now) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<RiskAssessmentService<R, N>>>,
    axum::Json(profile): axum::Json<PersonProfile>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.register(profile) {
        Ok(profile) => {
            let payload = json!({
                "person_id": profile.person_id,
                "status": "registered",
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "person already registered" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<RiskAssessmentService<R, N>>>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.profiles() {
        Ok(profiles) => (StatusCode::OK, axum::Json(profiles)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<R, N>(
    State(service): State<Arc<RiskAssessmentService<R, N>>>,
    Path(person_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = PersonId(person_id);
    match service.profile(&id) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<R, N>(
    State(service): State<Arc<RiskAssessmentService<R, N>>>,
    axum::Json(request): axum::Json<FeedbackRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let result = service.record_feedback(
        PersonId(request.person_id),
        AlertId(request.alert_id),
        request.feedback_type,
        request.comment,
        Utc::now(),
    );

    match result {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::UnknownPerson(_) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ServiceError::Repository(_) | ServiceError::Publish(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
