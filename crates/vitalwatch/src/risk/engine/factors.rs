use chrono::{DateTime, Duration, Utc};

use super::super::domain::{Alert, PersonProfile};
use super::super::knowledge::KnowledgeBase;
use super::clamp01;

/// Proximity assigned when the alert carries no location text at all.
const UNKNOWN_LOCATION_PROXIMITY: f64 = 0.3;

/// Sensitivity assumed for diseases the person has no feedback history on.
const DEFAULT_LEARNED_PREFERENCE: f64 = 0.5;

/// Departures at most this many days out count as imminent travel.
const IMMINENT_DEPARTURE_DAYS: i64 = 14;

/// Result of comparing two free-text "City, Country" labels.
///
/// Matching is a deliberate string heuristic: labels are split on commas,
/// segments trimmed and lower-cased, the first segment treated as the city
/// and the last as the country. Coordinates are never consulted even when
/// both sides carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocationMatch {
    SameCity,
    SameCountry,
    Unrelated,
}

pub(crate) fn match_locations(left: &str, right: &str) -> LocationMatch {
    let left_parts: Vec<String> = segments(left);
    let right_parts: Vec<String> = segments(right);

    match (left_parts.first(), right_parts.first()) {
        (Some(a), Some(b)) if a == b => return LocationMatch::SameCity,
        _ => {}
    }

    if left_parts.len() > 1 && right_parts.len() > 1 {
        match (left_parts.last(), right_parts.last()) {
            (Some(a), Some(b)) if a == b => return LocationMatch::SameCountry,
            _ => {}
        }
    }

    LocationMatch::Unrelated
}

fn segments(label: &str) -> Vec<String> {
    label
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Severity tier weight, averaged with the normalized mortality rate when
/// the alert reports one.
pub(crate) fn base_severity(alert: &Alert) -> f64 {
    let mut weight = alert.severity.weight();

    if let Some(rate) = alert.mortality_rate {
        let mortality = clamp01(rate / 10.0);
        weight = (weight + mortality) / 2.0;
    }

    clamp01(weight)
}

/// Highest interaction across the person's conditions: the most concerning
/// condition dominates. No conditions means no vulnerability.
pub(crate) fn health_vulnerability(
    person: &PersonProfile,
    alert: &Alert,
    knowledge: &KnowledgeBase,
) -> f64 {
    let strongest = person
        .health_conditions
        .iter()
        .map(|condition| {
            knowledge.multiplier(&alert.disease, &condition.name) * condition.severity.weight()
        })
        .fold(0.0, f64::max);

    clamp01(strongest)
}

pub(crate) fn geographic_proximity(person: &PersonProfile, alert: &Alert) -> f64 {
    let Some(alert_location) = alert.location.as_deref() else {
        return UNKNOWN_LOCATION_PROXIMITY;
    };

    match match_locations(&person.location, alert_location) {
        LocationMatch::SameCity => 1.0,
        LocationMatch::SameCountry => 0.6,
        LocationMatch::Unrelated => 0.1,
    }
}

pub(crate) fn family_exposure(person: &PersonProfile, alert: &Alert) -> f64 {
    let Some(alert_location) = alert.location.as_deref() else {
        return 0.0;
    };

    person
        .family_members
        .iter()
        .map(
            |member| match match_locations(&member.location, alert_location) {
                LocationMatch::SameCity => 0.8,
                LocationMatch::SameCountry => 0.4,
                LocationMatch::Unrelated => 0.0,
            },
        )
        .fold(0.0, f64::max)
}

/// Risk from trips that have not yet ended. A destination in the affected
/// city scores 1.0 when departure is within the imminent window (or already
/// past for an ongoing trip), 0.7 otherwise; a country-level match scores
/// 0.5.
pub(crate) fn travel_risk(person: &PersonProfile, alert: &Alert, now: DateTime<Utc>) -> f64 {
    let Some(alert_location) = alert.location.as_deref() else {
        return 0.0;
    };

    let mut highest: f64 = 0.0;

    for plan in &person.travel_plans {
        if plan.return_date < now {
            continue;
        }

        match match_locations(&plan.destination, alert_location) {
            LocationMatch::SameCity => {
                let contribution = if plan.departure - now <= Duration::days(IMMINENT_DEPARTURE_DAYS)
                {
                    1.0
                } else {
                    0.7
                };
                highest = highest.max(contribution);
            }
            LocationMatch::SameCountry => highest = highest.max(0.5),
            LocationMatch::Unrelated => {}
        }
    }

    highest
}

pub(crate) fn learned_preference(person: &PersonProfile, alert: &Alert) -> f64 {
    person
        .learned_weights
        .get(&alert.disease.to_lowercase())
        .copied()
        .unwrap_or(DEFAULT_LEARNED_PREFERENCE)
}
