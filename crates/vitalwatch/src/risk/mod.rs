//! Personalized risk assessment: domain model, knowledge base, the scoring
//! engine, and the service/router plumbing around it.

pub mod domain;
pub(crate) mod engine;
pub mod knowledge;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ActionKind, Alert, AlertId, ConditionSeverity, FamilyMember, FeedbackKind, FeedbackRecord,
    HealthCondition, OutbreakSeverity, PersonId, PersonProfile, Preferences, RiskFactors,
    RiskLevel, RiskScore, RiskTolerance, TravelPlan,
};
pub use engine::RiskEngine;
pub use knowledge::KnowledgeBase;
pub use repository::{
    AssessmentRecord, NotificationChannel, NotificationPublisher, NotificationRequest,
    ProfileRepository, PublishError, RepositoryError,
};
pub use router::risk_router;
pub use service::{RiskAssessmentService, ServiceError};
