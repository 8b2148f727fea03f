use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::risk::domain::{
    Alert, AlertId, ConditionSeverity, FamilyMember, FeedbackRecord, HealthCondition,
    OutbreakSeverity, PersonId, PersonProfile, TravelPlan,
};
use crate::risk::engine::RiskEngine;
use crate::risk::repository::{
    AssessmentRecord, NotificationPublisher, NotificationRequest, ProfileRepository,
    PublishError, RepositoryError,
};
use crate::risk::service::RiskAssessmentService;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::default()
}

pub(super) fn person(id: &str) -> PersonProfile {
    PersonProfile {
        person_id: PersonId(id.to_string()),
        name: "Test Person".to_string(),
        email: format!("{id}@example.com"),
        location: "Toronto, Canada".to_string(),
        latitude: None,
        longitude: None,
        health_conditions: Vec::new(),
        family_members: Vec::new(),
        travel_plans: Vec::new(),
        preferences: Default::default(),
        learned_weights: Default::default(),
    }
}

pub(super) fn condition(name: &str, severity: ConditionSeverity) -> HealthCondition {
    HealthCondition {
        name: name.to_string(),
        severity,
        diagnosed_on: None,
    }
}

pub(super) fn family_member(name: &str, location: &str) -> FamilyMember {
    FamilyMember {
        name: name.to_string(),
        relationship: "sibling".to_string(),
        location: location.to_string(),
    }
}

pub(super) fn trip(destination: &str, departs_in_days: i64, returns_in_days: i64) -> TravelPlan {
    TravelPlan {
        destination: destination.to_string(),
        departure: fixed_now() + Duration::days(departs_in_days),
        return_date: fixed_now() + Duration::days(returns_in_days),
        purpose: None,
    }
}

/// Diabetic person living in the alert city.
pub(super) fn maria() -> PersonProfile {
    let mut profile = person("demo_maria");
    profile.location = "São Paulo, Brazil".to_string();
    profile
        .health_conditions
        .push(condition("diabetes", ConditionSeverity::Moderate));
    profile
}

pub(super) fn dengue_alert() -> Alert {
    Alert {
        alert_id: AlertId("alert-dengue-sp".to_string()),
        title: "Dengue outbreak in São Paulo".to_string(),
        description: "Rising case counts across the metro area".to_string(),
        disease: "dengue".to_string(),
        location: Some("São Paulo, Brazil".to_string()),
        latitude: None,
        longitude: None,
        severity: OutbreakSeverity::Outbreak,
        affected_population: Some(1200),
        mortality_rate: Some(0.6),
        source: "ProMED".to_string(),
        published_at: fixed_now(),
    }
}

pub(super) fn sporadic_flu_alert() -> Alert {
    Alert {
        alert_id: AlertId("alert-flu-lagos".to_string()),
        title: "Sporadic flu cases in Lagos".to_string(),
        description: String::new(),
        disease: "flu".to_string(),
        location: Some("Lagos, Nigeria".to_string()),
        latitude: None,
        longitude: None,
        severity: OutbreakSeverity::Sporadic,
        affected_population: None,
        mortality_rate: None,
        source: "WHO".to_string(),
        published_at: fixed_now(),
    }
}

pub(super) fn build_service() -> (
    RiskAssessmentService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifications::default());
    let service = RiskAssessmentService::new(repository.clone(), notifier.clone(), engine());
    (service, repository, notifier)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    profiles: Mutex<HashMap<PersonId, PersonProfile>>,
    assessments: Mutex<Vec<AssessmentRecord>>,
    feedback: Mutex<Vec<FeedbackRecord>>,
}

impl MemoryRepository {
    pub(super) fn assessment_count(&self) -> usize {
        self.assessments.lock().expect("assessments poisoned").len()
    }

    pub(super) fn feedback_count(&self) -> usize {
        self.feedback.lock().expect("feedback poisoned").len()
    }
}

impl ProfileRepository for MemoryRepository {
    fn insert_profile(&self, profile: PersonProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("profiles poisoned");
        if guard.contains_key(&profile.person_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.person_id.clone(), profile);
        Ok(())
    }

    fn fetch_profile(&self, id: &PersonId) -> Result<Option<PersonProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profiles poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_profiles(&self) -> Result<Vec<PersonProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profiles poisoned");
        let mut profiles: Vec<PersonProfile> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| a.person_id.cmp(&b.person_id));
        Ok(profiles)
    }

    fn save_assessment(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.assessments
            .lock()
            .expect("assessments poisoned")
            .push(record);
        Ok(())
    }

    fn assessments_for(&self, id: &PersonId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessments poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.score.person_id == id)
            .cloned()
            .collect())
    }

    fn save_feedback(&self, record: FeedbackRecord) -> Result<(), RepositoryError> {
        self.feedback.lock().expect("feedback poisoned").push(record);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    events: Mutex<Vec<NotificationRequest>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<NotificationRequest> {
        self.events.lock().expect("events poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, request: NotificationRequest) -> Result<(), PublishError> {
        self.events.lock().expect("events poisoned").push(request);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn insert_profile(&self, _profile: PersonProfile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_profile(&self, _id: &PersonId) -> Result<Option<PersonProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_profiles(&self) -> Result<Vec<PersonProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_assessment(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn assessments_for(&self, _id: &PersonId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_feedback(&self, _record: FeedbackRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
