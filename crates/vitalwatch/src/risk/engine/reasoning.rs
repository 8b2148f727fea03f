use super::super::domain::{Alert, PersonProfile, RiskFactors};

const HIGH: f64 = 0.7;
const MODERATE: f64 = 0.4;

// Geography sentences only fire on near-certain matches, so their thresholds
// sit above the shared ones.
const GEO_HIGH: f64 = 0.9;
const GEO_MODERATE: f64 = 0.5;

const FALLBACK: &str = "Low overall risk based on your profile";

/// Stateless explanation of an assessment: one sentence per factor that
/// crossed its threshold, in a fixed order (severity, health, geography,
/// family, travel), naming the evidence behind the factor. Never empty.
pub(crate) fn explain(person: &PersonProfile, alert: &Alert, factors: &RiskFactors) -> Vec<String> {
    let mut reasoning = Vec::new();

    if factors.base_severity >= HIGH {
        reasoning.push(format!(
            "High severity {} outbreak reported",
            alert.severity.label()
        ));
    } else if factors.base_severity >= MODERATE {
        reasoning.push(format!(
            "Moderate severity {} detected",
            alert.severity.label()
        ));
    }

    if factors.health_vulnerability >= HIGH {
        let conditions: Vec<&str> = person
            .health_conditions
            .iter()
            .map(|condition| condition.name.as_str())
            .collect();
        reasoning.push(format!(
            "Your health conditions ({}) increase vulnerability",
            conditions.join(", ")
        ));
    } else if factors.health_vulnerability >= MODERATE {
        reasoning.push("Some of your health conditions may be relevant".to_string());
    }

    if factors.geographic_proximity >= GEO_HIGH {
        reasoning.push(format!(
            "Outbreak is in your current location ({})",
            person.location
        ));
    } else if factors.geographic_proximity >= GEO_MODERATE {
        reasoning.push("Outbreak is in your country/region".to_string());
    }

    if factors.family_exposure >= HIGH {
        reasoning.push("Family members are in the affected area".to_string());
    } else if factors.family_exposure >= MODERATE {
        reasoning.push("Family members may be in nearby regions".to_string());
    }

    if factors.travel_risk >= HIGH {
        reasoning.push("You have upcoming travel to the affected area".to_string());
    } else if factors.travel_risk >= MODERATE {
        reasoning.push("Your travel plans may be affected".to_string());
    }

    if reasoning.is_empty() {
        reasoning.push(FALLBACK.to_string());
    }

    reasoning
}
