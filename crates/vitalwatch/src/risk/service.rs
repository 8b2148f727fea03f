use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{
    ActionKind, Alert, AlertId, FeedbackKind, FeedbackRecord, PersonId, PersonProfile, RiskScore,
};
use super::engine::RiskEngine;
use super::repository::{
    AssessmentRecord, NotificationChannel, NotificationPublisher, NotificationRequest,
    ProfileRepository, PublishError, RepositoryError,
};

/// Service composing the risk engine with profile storage and notification
/// dispatch. The engine itself stays pure; every side effect an assessment
/// implies happens here.
pub struct RiskAssessmentService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: Arc<RiskEngine>,
}

impl<R, N> RiskAssessmentService<R, N>
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, engine: RiskEngine) -> Self {
        Self {
            repository,
            notifier,
            engine: Arc::new(engine),
        }
    }

    /// Register a new person profile. Conflicts surface as errors so callers
    /// can distinguish re-registration from creation.
    pub fn register(&self, profile: PersonProfile) -> Result<PersonProfile, ServiceError> {
        self.repository.insert_profile(profile.clone())?;
        info!(person_id = %profile.person_id, "person profile registered");
        Ok(profile)
    }

    pub fn profile(&self, id: &PersonId) -> Result<PersonProfile, ServiceError> {
        self.repository
            .fetch_profile(id)?
            .ok_or_else(|| ServiceError::UnknownPerson(id.clone()))
    }

    pub fn profiles(&self) -> Result<Vec<PersonProfile>, ServiceError> {
        Ok(self.repository.list_profiles()?)
    }

    /// Assess an alert for a registered person, persist the result as an
    /// immutable record, and dispatch whatever notifications the outcome
    /// recommends.
    ///
    /// `now` overrides the evaluation instant for reproducible runs; live
    /// callers pass `None` and get the wall clock.
    pub fn assess(
        &self,
        person_id: &PersonId,
        alert: &Alert,
        now: Option<DateTime<Utc>>,
    ) -> Result<RiskScore, ServiceError> {
        let person = self.profile(person_id)?;
        let now = now.unwrap_or_else(Utc::now);

        let score = self.engine.assess(&person, alert, now);

        self.repository.save_assessment(AssessmentRecord {
            score: score.clone(),
            assessed_at: now,
        })?;

        self.dispatch(&person, &score)?;

        info!(
            person_id = %score.person_id,
            alert_id = %score.alert_id,
            risk_level = score.risk_level.label(),
            score = score.score,
            "risk assessment recorded"
        );

        Ok(score)
    }

    /// Record feedback on a past assessment. Weights are adjusted by an
    /// offline pipeline, not here.
    pub fn record_feedback(
        &self,
        person_id: PersonId,
        alert_id: AlertId,
        kind: FeedbackKind,
        comment: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<FeedbackRecord, ServiceError> {
        // Reject feedback for people we have never seen.
        self.profile(&person_id)?;

        let record = FeedbackRecord {
            person_id,
            alert_id,
            kind,
            comment,
            submitted_at,
        };
        self.repository.save_feedback(record.clone())?;
        Ok(record)
    }

    /// Deliverable actions only go out when the assessment clears the
    /// person's notification threshold; log-only outcomes never leave the
    /// process.
    fn dispatch(&self, person: &PersonProfile, score: &RiskScore) -> Result<(), ServiceError> {
        if score.risk_level < person.preferences.notification_threshold {
            debug!(
                person_id = %score.person_id,
                risk_level = score.risk_level.label(),
                "assessment below notification threshold, suppressing delivery"
            );
            return Ok(());
        }

        for action in &score.recommended_actions {
            let channel = match action {
                ActionKind::ImmediateAlert => NotificationChannel::Immediate,
                ActionKind::EmailNotification => NotificationChannel::Email,
                ActionKind::LogOnly => {
                    debug!(person_id = %score.person_id, "log-only assessment");
                    continue;
                }
            };

            self.notifier.publish(NotificationRequest {
                channel,
                person_id: score.person_id.clone(),
                email: person.email.clone(),
                alert_id: score.alert_id.clone(),
                risk_level: score.risk_level,
                priority: score.priority,
                language: person.preferences.preferred_language.clone(),
                needs_translation: score.needs_translation,
                needs_image: score.needs_image,
            })?;
        }

        Ok(())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no profile registered for '{0}'")]
    UnknownPerson(PersonId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
