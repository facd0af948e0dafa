use serde::{Deserialize, Serialize};

/// A model coefficient magnitude, one entry of `GET /importance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    #[serde(rename = "name")]
    pub feature_name: String,
    #[serde(rename = "value")]
    pub weight: f64,
}

impl FeatureImportance {
    pub fn new(feature_name: impl Into<String>, weight: f64) -> Self {
        Self {
            feature_name: feature_name.into(),
            weight,
        }
    }
}

/// Ranking shown when the service cannot provide one.
pub fn default_feature_importance() -> Vec<FeatureImportance> {
    vec![
        FeatureImportance::new("purchases", 1.2),
        FeatureImportance::new("loyalty", 0.8),
        FeatureImportance::new("discounts x loyalty", 0.5),
        FeatureImportance::new("age", 0.45),
        FeatureImportance::new("discounts", 0.3),
    ]
}
