use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AlertId, FeedbackRecord, PersonId, PersonProfile, RiskLevel, RiskScore};

/// Immutable historical record of one assessment, keyed by person, alert,
/// and the instant it was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub score: RiskScore,
    pub assessed_at: DateTime<Utc>,
}

/// Storage abstraction so the assessment service can be exercised in
/// isolation. Implementations back onto whatever store the deployment uses;
/// tests and the bundled API use in-memory maps.
pub trait ProfileRepository: Send + Sync {
    fn insert_profile(&self, profile: PersonProfile) -> Result<(), RepositoryError>;
    fn fetch_profile(&self, id: &PersonId) -> Result<Option<PersonProfile>, RepositoryError>;
    fn list_profiles(&self) -> Result<Vec<PersonProfile>, RepositoryError>;
    fn save_assessment(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn assessments_for(&self, id: &PersonId) -> Result<Vec<AssessmentRecord>, RepositoryError>;
    fn save_feedback(&self, record: FeedbackRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Delivery channel implied by a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Immediate,
    Email,
}

/// Outbound notification request handed to delivery adapters. Translation
/// and image generation happen on the far side of this seam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub channel: NotificationChannel,
    pub person_id: PersonId,
    pub email: String,
    pub alert_id: AlertId,
    pub risk_level: RiskLevel,
    pub priority: u8,
    pub language: String,
    pub needs_translation: bool,
    pub needs_image: bool,
}

/// Trait describing outbound notification hooks (e-mail, push, webhook).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, request: NotificationRequest) -> Result<(), PublishError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
