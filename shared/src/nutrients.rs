//! Static nutrient reference data
//!
//! The snapshot below is placeholder chart data. It is not derived from any
//! advice reply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Consumed vs. recommended amounts, keyed by nutrient name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientSnapshot {
    pub actual: BTreeMap<String, f64>,
    pub recommended: BTreeMap<String, f64>,
}

/// (nutrient, consumed, recommended)
const PLACEHOLDER_SNAPSHOT: &[(&str, f64, f64)] = &[
    ("Protein (g)", 45.0, 56.0),
    ("Carbohydrates (g)", 210.0, 275.0),
    ("Fat (g)", 70.0, 78.0),
    ("Fiber (g)", 18.0, 30.0),
    ("Vitamin C (mg)", 55.0, 90.0),
    ("Iron (mg)", 9.0, 18.0),
    ("Calcium (mg)", 650.0, 1000.0),
];

impl NutrientSnapshot {
    pub fn placeholder() -> Self {
        let actual = PLACEHOLDER_SNAPSHOT
            .iter()
            .map(|(name, consumed, _)| (name.to_string(), *consumed))
            .collect();
        let recommended = PLACEHOLDER_SNAPSHOT
            .iter()
            .map(|(name, _, target)| (name.to_string(), *target))
            .collect();
        Self { actual, recommended }
    }
}

/// Symptoms offered by the deficiency selector
pub const SYMPTOMS: &[&str] = &[
    "Fatigue",
    "Hair loss",
    "Brittle nails",
    "Muscle cramps",
    "Pale skin",
    "Bleeding gums",
    "Poor night vision",
    "Frequent infections",
    "Numbness or tingling",
    "Bone pain",
    "Dry skin",
    "Mouth ulcers",
];

/// Case-insensitive lookup returning the canonical symptom label
pub fn canonical_symptom(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    SYMPTOMS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(needle))
}
