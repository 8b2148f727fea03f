use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered people.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for outbreak alerts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(pub String);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete risk classification, ordered from least to most severe so the
/// notification threshold preference can be compared directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Minimal => "minimal",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Follow-up actions a caller is expected to dispatch for an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ImmediateAlert,
    EmailNotification,
    LogOnly,
}

/// Outbreak scale reported by the alert source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutbreakSeverity {
    Pandemic,
    Epidemic,
    Outbreak,
    Cluster,
    Sporadic,
}

impl OutbreakSeverity {
    /// Base contribution of the tier to the severity factor.
    pub const fn weight(self) -> f64 {
        match self {
            OutbreakSeverity::Pandemic => 1.0,
            OutbreakSeverity::Epidemic => 0.8,
            OutbreakSeverity::Outbreak => 0.6,
            OutbreakSeverity::Cluster => 0.4,
            OutbreakSeverity::Sporadic => 0.2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OutbreakSeverity::Pandemic => "pandemic",
            OutbreakSeverity::Epidemic => "epidemic",
            OutbreakSeverity::Outbreak => "outbreak",
            OutbreakSeverity::Cluster => "cluster",
            OutbreakSeverity::Sporadic => "sporadic",
        }
    }
}

/// Clinical severity of a diagnosed condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSeverity {
    Mild,
    Moderate,
    Severe,
}

impl ConditionSeverity {
    pub const fn weight(self) -> f64 {
        match self {
            ConditionSeverity::Mild => 0.3,
            ConditionSeverity::Moderate => 0.6,
            ConditionSeverity::Severe => 1.0,
        }
    }
}

impl Default for ConditionSeverity {
    fn default() -> Self {
        ConditionSeverity::Moderate
    }
}

/// Stated sensitivity to being alerted; scales the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Moderate,
    High,
}

impl RiskTolerance {
    /// A low tolerance amplifies the score, a high tolerance dampens it.
    pub const fn multiplier(self) -> f64 {
        match self {
            RiskTolerance::Low => 1.5,
            RiskTolerance::Moderate => 1.0,
            RiskTolerance::High => 0.7,
        }
    }
}

impl Default for RiskTolerance {
    fn default() -> Self {
        RiskTolerance::Moderate
    }
}

/// Diagnosed health condition on a person profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCondition {
    pub name: String,
    #[serde(default)]
    pub severity: ConditionSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosed_on: Option<NaiveDate>,
}

/// Family member whose location feeds the exposure factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    pub relationship: String,
    /// Free-text "City, Country" label.
    pub location: String,
}

/// Planned trip considered by the travel risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    /// Free-text "City, Country" label.
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Notification and sensitivity preferences for a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    #[serde(default = "Preferences::default_threshold")]
    pub notification_threshold: RiskLevel,
    #[serde(default = "Preferences::default_language")]
    pub preferred_language: String,
    #[serde(default = "Preferences::default_wants_images")]
    pub wants_images: bool,
    #[serde(default)]
    pub wants_translations: bool,
}

impl Preferences {
    fn default_threshold() -> RiskLevel {
        RiskLevel::Medium
    }

    fn default_language() -> String {
        "en".to_string()
    }

    const fn default_wants_images() -> bool {
        true
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::Moderate,
            notification_threshold: Self::default_threshold(),
            preferred_language: Self::default_language(),
            wants_images: true,
            wants_translations: false,
        }
    }
}

/// Everything the engine knows about one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub person_id: PersonId,
    pub name: String,
    pub email: String,
    /// Free-text "City, Country" label.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub health_conditions: Vec<HealthCondition>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub travel_plans: Vec<TravelPlan>,
    #[serde(default)]
    pub preferences: Preferences,
    /// Per-disease sensitivity weights in [0, 1] learned from past feedback.
    /// Static from the engine's point of view.
    #[serde(default)]
    pub learned_weights: BTreeMap<String, f64>,
}

/// Disease outbreak alert supplied by an upstream scraper or feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: AlertId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub disease: String,
    /// Free-text "City, Country" label; absent when the source gave none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub severity: OutbreakSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_population: Option<u64>,
    /// Deaths per hundred cases, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortality_rate: Option<f64>,
    #[serde(default)]
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// The six independent [0, 1] scores feeding the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub base_severity: f64,
    pub health_vulnerability: f64,
    pub geographic_proximity: f64,
    pub family_exposure: f64,
    pub travel_risk: f64,
    pub learned_preference: f64,
}

/// Complete assessment for one (person, alert) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub person_id: PersonId,
    pub alert_id: AlertId,
    pub risk_level: RiskLevel,
    /// Tolerance-adjusted composite score in [0, 1].
    pub score: f64,
    /// Data-completeness confidence in [0, 1].
    pub confidence: f64,
    pub factors: RiskFactors,
    /// Never empty; a fallback sentence is emitted when no factor stands out.
    pub reasoning: Vec<String>,
    pub recommended_actions: Vec<ActionKind>,
    pub needs_translation: bool,
    pub needs_image: bool,
    /// Notification priority from 1 (most urgent) to 10.
    pub priority: u8,
}

/// Reaction a person reported on a past assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Helpful,
    NotHelpful,
    TooSensitive,
    NotSensitiveEnough,
    FalsePositive,
}

/// Stored feedback event; consumed offline by the learning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub person_id: PersonId,
    pub alert_id: AlertId,
    pub kind: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
