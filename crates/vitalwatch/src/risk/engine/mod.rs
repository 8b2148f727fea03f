//! The risk engine: a pure, single-pass pipeline from (person, alert, now)
//! to an explainable [`RiskScore`].
//!
//! The engine holds no state beyond the immutable knowledge base, so one
//! instance can serve arbitrarily many concurrent callers without locking.
//! It never reads the system clock; travel evaluation time is injected so
//! identical inputs always produce identical output.

pub(crate) mod factors;
pub(crate) mod outputs;
pub(crate) mod reasoning;

use chrono::{DateTime, Utc};

use super::domain::{Alert, PersonProfile, RiskFactors, RiskLevel, RiskScore};
use super::knowledge::KnowledgeBase;

/// Factor weights for the composite score. They sum to 1.0.
const BASE_SEVERITY_WEIGHT: f64 = 0.25;
const HEALTH_VULNERABILITY_WEIGHT: f64 = 0.25;
const GEOGRAPHIC_PROXIMITY_WEIGHT: f64 = 0.15;
const FAMILY_EXPOSURE_WEIGHT: f64 = 0.15;
const TRAVEL_RISK_WEIGHT: f64 = 0.15;
const LEARNED_PREFERENCE_WEIGHT: f64 = 0.05;

pub(crate) fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Stateless assessor combining the six risk factors against an immutable
/// knowledge base. Construct once and share by reference.
pub struct RiskEngine {
    knowledge: KnowledgeBase,
}

impl RiskEngine {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Assess one (person, alert) pair at the given instant.
    ///
    /// Well-formed inputs never fail: empty collections zero out their
    /// factors, unknown diseases and conditions fall back to neutral
    /// multipliers, and every output is clamped to its documented range.
    pub fn assess(
        &self,
        person: &PersonProfile,
        alert: &Alert,
        now: DateTime<Utc>,
    ) -> RiskScore {
        let factors = RiskFactors {
            base_severity: factors::base_severity(alert),
            health_vulnerability: factors::health_vulnerability(person, alert, &self.knowledge),
            geographic_proximity: factors::geographic_proximity(person, alert),
            family_exposure: factors::family_exposure(person, alert),
            travel_risk: factors::travel_risk(person, alert, now),
            learned_preference: factors::learned_preference(person, alert),
        };

        let composite = composite_score(&factors);
        let score = clamp01(composite * person.preferences.risk_tolerance.multiplier());
        let risk_level = outputs::classify(score);

        let reasoning = reasoning::explain(person, alert, &factors);
        let recommended_actions = outputs::recommended_actions(risk_level);

        let alerting = matches!(risk_level, RiskLevel::High | RiskLevel::Critical);
        let needs_translation = person.preferences.wants_translations
            && person.preferences.preferred_language != "en"
            && alerting;
        let needs_image = person.preferences.wants_images && alerting;

        RiskScore {
            person_id: person.person_id.clone(),
            alert_id: alert.alert_id.clone(),
            risk_level,
            score,
            confidence: outputs::confidence(person, alert),
            factors,
            reasoning,
            recommended_actions,
            needs_translation,
            needs_image,
            priority: outputs::priority(score),
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(KnowledgeBase::builtin())
    }
}

/// Weighted sum of the six factors, clamped to [0, 1].
pub(crate) fn composite_score(factors: &RiskFactors) -> f64 {
    clamp01(
        factors.base_severity * BASE_SEVERITY_WEIGHT
            + factors.health_vulnerability * HEALTH_VULNERABILITY_WEIGHT
            + factors.geographic_proximity * GEOGRAPHIC_PROXIMITY_WEIGHT
            + factors.family_exposure * FAMILY_EXPOSURE_WEIGHT
            + factors.travel_risk * TRAVEL_RISK_WEIGHT
            + factors.learned_preference * LEARNED_PREFERENCE_WEIGHT,
    )
}
