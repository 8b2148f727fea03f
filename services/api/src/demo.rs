use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use vitalwatch::error::AppError;
use vitalwatch::risk::{
    Alert, AlertId, OutbreakSeverity, PersonId, ProfileRepository, RiskAssessmentService,
    RiskEngine,
};

use crate::infra::{parse_severity, seed_profiles, InMemoryNotificationPublisher,
    InMemoryProfileRepository};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Seeded demo profile to assess (demo_maria, demo_john, demo_sarah)
    #[arg(long, default_value = "demo_maria")]
    pub(crate) person: String,
    /// Disease named by the alert
    #[arg(long, default_value = "dengue")]
    pub(crate) disease: String,
    /// Alert location as a "City, Country" label
    #[arg(long, default_value = "São Paulo, Brazil")]
    pub(crate) location: String,
    /// Outbreak severity tier
    #[arg(long, default_value = "outbreak", value_parser = parse_severity)]
    pub(crate) severity: OutbreakSeverity,
    /// Reported mortality rate, deaths per hundred cases
    #[arg(long)]
    pub(crate) mortality: Option<f64>,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryProfileRepository::default());
    for profile in seed_profiles() {
        repository
            .insert_profile(profile)
            .map_err(vitalwatch::risk::ServiceError::from)?;
    }

    let service = RiskAssessmentService::new(
        repository,
        Arc::new(InMemoryNotificationPublisher::default()),
        RiskEngine::default(),
    );

    let alert = Alert {
        alert_id: AlertId(format!("cli-{}", args.disease.to_lowercase())),
        title: format!("{} activity in {}", args.disease, args.location),
        description: String::new(),
        disease: args.disease,
        location: Some(args.location),
        latitude: None,
        longitude: None,
        severity: args.severity,
        affected_population: None,
        mortality_rate: args.mortality,
        source: "cli".to_string(),
        published_at: Utc::now(),
    };

    let person_id = PersonId(args.person);
    let score = service.assess(&person_id, &alert, None)?;

    println!("Assessment for {person_id} against {}", score.alert_id);
    println!(
        "  risk level : {} (score {:.3}, confidence {:.2}, priority {})",
        score.risk_level.label(),
        score.score,
        score.confidence,
        score.priority
    );
    println!("  factors:");
    println!("    base severity        {:.2}", score.factors.base_severity);
    println!(
        "    health vulnerability {:.2}",
        score.factors.health_vulnerability
    );
    println!(
        "    geographic proximity {:.2}",
        score.factors.geographic_proximity
    );
    println!("    family exposure      {:.2}", score.factors.family_exposure);
    println!("    travel risk          {:.2}", score.factors.travel_risk);
    println!(
        "    learned preference   {:.2}",
        score.factors.learned_preference
    );
    println!("  reasoning:");
    for sentence in &score.reasoning {
        println!("    - {sentence}");
    }
    println!("  actions    : {:?}", score.recommended_actions);
    println!(
        "  delivery   : translation={} image={}",
        score.needs_translation, score.needs_image
    );

    Ok(())
}
