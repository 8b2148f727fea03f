use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use vitalwatch::risk::{
    AssessmentRecord, ConditionSeverity, FamilyMember, FeedbackRecord, HealthCondition,
    NotificationPublisher, NotificationRequest, OutbreakSeverity, PersonId, PersonProfile,
    Preferences, ProfileRepository, PublishError, RepositoryError, RiskLevel, RiskTolerance,
    TravelPlan,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<PersonId, PersonProfile>>,
    assessments: Mutex<Vec<AssessmentRecord>>,
    feedback: Mutex<Vec<FeedbackRecord>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn insert_profile(&self, profile: PersonProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        if guard.contains_key(&profile.person_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.person_id.clone(), profile);
        Ok(())
    }

    fn fetch_profile(&self, id: &PersonId) -> Result<Option<PersonProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_profiles(&self) -> Result<Vec<PersonProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        let mut profiles: Vec<PersonProfile> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| a.person_id.cmp(&b.person_id));
        Ok(profiles)
    }

    fn save_assessment(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.assessments
            .lock()
            .expect("assessment mutex poisoned")
            .push(record);
        Ok(())
    }

    fn assessments_for(&self, id: &PersonId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.score.person_id == id)
            .cloned()
            .collect())
    }

    fn save_feedback(&self, record: FeedbackRecord) -> Result<(), RepositoryError> {
        self.feedback
            .lock()
            .expect("feedback mutex poisoned")
            .push(record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<NotificationRequest>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, request: NotificationRequest) -> Result<(), PublishError> {
        tracing::info!(
            person_id = %request.person_id,
            alert_id = %request.alert_id,
            channel = ?request.channel,
            priority = request.priority,
            "notification queued"
        );
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(request);
        Ok(())
    }
}

/// Demo profiles showing how one alert fans out into different outcomes:
/// a diabetic in the outbreak city, a healthy unconnected bystander, and a
/// pregnant traveler about to fly in.
pub(crate) fn seed_profiles() -> Vec<PersonProfile> {
    let now = Utc::now();

    vec![
        PersonProfile {
            person_id: PersonId("demo_maria".to_string()),
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            location: "São Paulo, Brazil".to_string(),
            latitude: Some(-23.55),
            longitude: Some(-46.63),
            health_conditions: vec![
                HealthCondition {
                    name: "diabetes".to_string(),
                    severity: ConditionSeverity::Moderate,
                    diagnosed_on: None,
                },
                HealthCondition {
                    name: "hypertension".to_string(),
                    severity: ConditionSeverity::Mild,
                    diagnosed_on: None,
                },
            ],
            family_members: vec![FamilyMember {
                name: "Paulo Silva".to_string(),
                relationship: "father".to_string(),
                location: "Rio de Janeiro, Brazil".to_string(),
            }],
            travel_plans: Vec::new(),
            preferences: Preferences {
                risk_tolerance: RiskTolerance::Moderate,
                notification_threshold: RiskLevel::Medium,
                preferred_language: "pt".to_string(),
                wants_images: true,
                wants_translations: true,
            },
            learned_weights: Default::default(),
        },
        PersonProfile {
            person_id: PersonId("demo_john".to_string()),
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            location: "Toronto, Canada".to_string(),
            latitude: Some(43.65),
            longitude: Some(-79.38),
            health_conditions: Vec::new(),
            family_members: Vec::new(),
            travel_plans: Vec::new(),
            preferences: Preferences {
                risk_tolerance: RiskTolerance::High,
                ..Default::default()
            },
            learned_weights: Default::default(),
        },
        PersonProfile {
            person_id: PersonId("demo_sarah".to_string()),
            name: "Sarah Chen".to_string(),
            email: "sarah@example.com".to_string(),
            location: "Singapore".to_string(),
            latitude: Some(1.35),
            longitude: Some(103.82),
            health_conditions: vec![HealthCondition {
                name: "pregnancy".to_string(),
                severity: ConditionSeverity::Moderate,
                diagnosed_on: None,
            }],
            family_members: Vec::new(),
            travel_plans: vec![TravelPlan {
                destination: "São Paulo, Brazil".to_string(),
                departure: now + Duration::days(10),
                return_date: now + Duration::days(24),
                purpose: Some("conference".to_string()),
            }],
            preferences: Preferences {
                risk_tolerance: RiskTolerance::Low,
                notification_threshold: RiskLevel::Low,
                preferred_language: "zh".to_string(),
                wants_images: true,
                wants_translations: true,
            },
            learned_weights: Default::default(),
        },
    ]
}

pub(crate) fn parse_severity(raw: &str) -> Result<OutbreakSeverity, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pandemic" => Ok(OutbreakSeverity::Pandemic),
        "epidemic" => Ok(OutbreakSeverity::Epidemic),
        "outbreak" => Ok(OutbreakSeverity::Outbreak),
        "cluster" => Ok(OutbreakSeverity::Cluster),
        "sporadic" => Ok(OutbreakSeverity::Sporadic),
        other => Err(format!(
            "unknown severity '{other}' (expected pandemic, epidemic, outbreak, cluster, or sporadic)"
        )),
    }
}
