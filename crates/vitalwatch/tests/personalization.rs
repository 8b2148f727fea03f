use chrono::{DateTime, Duration, TimeZone, Utc};
use vitalwatch::risk::{
    ActionKind, Alert, AlertId, ConditionSeverity, HealthCondition, OutbreakSeverity, PersonId,
    PersonProfile, RiskEngine, RiskLevel, RiskTolerance, TravelPlan,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()
}

fn profile(id: &str, location: &str) -> PersonProfile {
    PersonProfile {
        person_id: PersonId(id.to_string()),
        name: id.to_string(),
        email: format!("{id}@example.com"),
        location: location.to_string(),
        latitude: None,
        longitude: None,
        health_conditions: Vec::new(),
        family_members: Vec::new(),
        travel_plans: Vec::new(),
        preferences: Default::default(),
        learned_weights: Default::default(),
    }
}

fn alert(disease: &str, location: &str, severity: OutbreakSeverity) -> Alert {
    Alert {
        alert_id: AlertId(format!("alert-{disease}")),
        title: format!("{disease} alert"),
        description: String::new(),
        disease: disease.to_string(),
        location: Some(location.to_string()),
        latitude: None,
        longitude: None,
        severity,
        affected_population: None,
        mortality_rate: None,
        source: "WHO".to_string(),
        published_at: now(),
    }
}

#[test]
fn diabetic_in_outbreak_city_is_high_risk() {
    let mut maria = profile("maria", "São Paulo, Brazil");
    maria.health_conditions.push(HealthCondition {
        name: "diabetes".to_string(),
        severity: ConditionSeverity::Moderate,
        diagnosed_on: None,
    });

    let mut dengue = alert("dengue", "São Paulo, Brazil", OutbreakSeverity::Outbreak);
    dengue.mortality_rate = Some(0.6);

    let score = RiskEngine::default().assess(&maria, &dengue, now());

    assert!((score.factors.health_vulnerability - 1.0).abs() < 1e-9);
    assert!((score.factors.geographic_proximity - 1.0).abs() < 1e-9);
    assert!((score.factors.base_severity - 0.33).abs() < 1e-9);
    assert!((score.factors.learned_preference - 0.5).abs() < 1e-9);
    assert!((score.score - 0.5075).abs() < 1e-9);
    assert_eq!(score.risk_level, RiskLevel::High);
    assert_eq!(
        score.recommended_actions,
        vec![ActionKind::EmailNotification]
    );
}

#[test]
fn healthy_and_unconnected_person_stays_quiet() {
    let john = profile("john", "Toronto, Canada");
    let flu = alert("flu", "Lagos, Nigeria", OutbreakSeverity::Sporadic);

    let score = RiskEngine::default().assess(&john, &flu, now());

    assert!(score.risk_level <= RiskLevel::Low);
    assert_eq!(score.recommended_actions, vec![ActionKind::LogOnly]);
    assert!(!score.needs_translation);
    assert!(!score.needs_image);
}

#[test]
fn pregnant_traveler_departing_soon_is_critical() {
    let mut sarah = profile("sarah", "Singapore");
    sarah.health_conditions.push(HealthCondition {
        name: "pregnancy".to_string(),
        severity: ConditionSeverity::Moderate,
        diagnosed_on: None,
    });
    sarah.travel_plans.push(TravelPlan {
        destination: "São Paulo, Brazil".to_string(),
        departure: now() + Duration::days(10),
        return_date: now() + Duration::days(24),
        purpose: Some("family visit".to_string()),
    });
    sarah.preferences.risk_tolerance = RiskTolerance::Low;
    sarah.preferences.wants_translations = true;
    sarah.preferences.preferred_language = "zh".to_string();

    let dengue = alert("dengue", "São Paulo, Brazil", OutbreakSeverity::Epidemic);

    let score = RiskEngine::default().assess(&sarah, &dengue, now());

    assert!((score.factors.travel_risk - 1.0).abs() < 1e-9);
    assert!((score.factors.health_vulnerability - 1.0).abs() < 1e-9);
    assert_eq!(score.risk_level, RiskLevel::Critical);
    assert_eq!(
        score.recommended_actions,
        vec![ActionKind::ImmediateAlert, ActionKind::EmailNotification]
    );
    assert!(score.needs_translation);
    assert!(score.needs_image);
    assert_eq!(score.priority, 1);
}
