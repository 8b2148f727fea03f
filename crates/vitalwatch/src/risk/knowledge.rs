use std::collections::BTreeMap;

/// Static disease → condition → vulnerability multiplier table.
///
/// All keys are held lower-cased. Lookup of an unknown disease or condition
/// yields [`KnowledgeBase::NEUTRAL_MULTIPLIER`]: the absence of a documented
/// interaction means "no known interaction", never an error. This is the one
/// get-with-default lookup in the engine; every other table is an exhaustive
/// match on an enum.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    interactions: BTreeMap<String, BTreeMap<String, f64>>,
}

impl KnowledgeBase {
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

    /// Build a knowledge base from an arbitrary interaction table. Keys are
    /// normalized to lower case so lookups are case-insensitive.
    pub fn new(interactions: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        let interactions = interactions
            .into_iter()
            .map(|(disease, conditions)| {
                let conditions = conditions
                    .into_iter()
                    .map(|(name, multiplier)| (name.to_lowercase(), multiplier))
                    .collect();
                (disease.to_lowercase(), conditions)
            })
            .collect();
        Self { interactions }
    }

    /// Interaction multiplier for a (disease, condition) pair, defaulting to
    /// the neutral multiplier when either side is unknown.
    pub fn multiplier(&self, disease: &str, condition: &str) -> f64 {
        self.interactions
            .get(&disease.to_lowercase())
            .and_then(|conditions| conditions.get(&condition.to_lowercase()))
            .copied()
            .unwrap_or(Self::NEUTRAL_MULTIPLIER)
    }

    /// Curated interactions for the diseases the alert feeds report most
    /// often. Replaceable wholesale via [`KnowledgeBase::new`].
    pub fn builtin() -> Self {
        let mut interactions = BTreeMap::new();

        interactions.insert(
            "dengue".to_string(),
            table(&[
                ("diabetes", 2.5),
                ("heart disease", 2.0),
                ("hypertension", 1.8),
                ("pregnancy", 3.0),
                ("kidney disease", 2.3),
                ("asthma", 1.3),
            ]),
        );
        interactions.insert(
            "covid-19".to_string(),
            table(&[
                ("diabetes", 2.2),
                ("heart disease", 2.5),
                ("hypertension", 2.0),
                ("obesity", 1.9),
                ("copd", 2.8),
                ("cancer", 2.4),
                ("pregnancy", 1.7),
            ]),
        );
        interactions.insert(
            "flu".to_string(),
            table(&[
                ("asthma", 2.5),
                ("copd", 2.8),
                ("pregnancy", 2.0),
                ("heart disease", 1.8),
                ("diabetes", 1.6),
            ]),
        );
        interactions.insert(
            "measles".to_string(),
            table(&[
                ("immunocompromised", 3.0),
                ("pregnancy", 2.5),
                ("malnutrition", 2.2),
            ]),
        );
        interactions.insert(
            "malaria".to_string(),
            table(&[
                ("pregnancy", 3.0),
                ("hiv/aids", 2.5),
                ("sickle cell disease", 2.8),
            ]),
        );

        Self { interactions }
    }
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, multiplier)| (name.to_string(), *multiplier))
        .collect()
}
