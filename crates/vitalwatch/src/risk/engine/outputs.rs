use super::super::domain::{ActionKind, Alert, PersonProfile, RiskLevel};

/// Classification thresholds, evaluated top-down with inclusive lower
/// bounds: a score of exactly 0.50 is High, not Medium.
const CRITICAL_FLOOR: f64 = 0.70;
const HIGH_FLOOR: f64 = 0.50;
const MEDIUM_FLOOR: f64 = 0.35;
const LOW_FLOOR: f64 = 0.20;

pub(crate) fn classify(score: f64) -> RiskLevel {
    if score >= CRITICAL_FLOOR {
        RiskLevel::Critical
    } else if score >= HIGH_FLOOR {
        RiskLevel::High
    } else if score >= MEDIUM_FLOOR {
        RiskLevel::Medium
    } else if score >= LOW_FLOOR {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

pub(crate) fn recommended_actions(level: RiskLevel) -> Vec<ActionKind> {
    match level {
        RiskLevel::Critical => vec![ActionKind::ImmediateAlert, ActionKind::EmailNotification],
        RiskLevel::High => vec![ActionKind::EmailNotification],
        RiskLevel::Medium | RiskLevel::Low | RiskLevel::Minimal => vec![ActionKind::LogOnly],
    }
}

/// Notification priority in 1..=10, monotonically decreasing in the score:
/// the riskier the assessment, the lower (more urgent) the number.
pub(crate) fn priority(score: f64) -> u8 {
    let inverted = ((1.0 - score) * 10.0).floor() as i64 + 1;
    inverted.clamp(1, 10) as u8
}

/// Confidence is the unweighted mean of five data-completeness indicators,
/// each falling back to a fixed partial credit when the data is absent.
pub(crate) fn confidence(person: &PersonProfile, alert: &Alert) -> f64 {
    let indicators = [
        if person.health_conditions.is_empty() {
            0.5
        } else {
            1.0
        },
        if person.family_members.is_empty() {
            0.8
        } else {
            1.0
        },
        if person.travel_plans.is_empty() {
            0.9
        } else {
            1.0
        },
        if alert.latitude.is_some() && alert.longitude.is_some() {
            1.0
        } else {
            0.7
        },
        if alert.mortality_rate.is_some() {
            1.0
        } else {
            0.8
        },
    ];

    indicators.iter().sum::<f64>() / indicators.len() as f64
}
