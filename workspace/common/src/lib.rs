//! Common transport-layer types shared between the scoring service client,
//! the native CLI and the browser frontend.
//! These structs mirror the service's request/response payloads so every
//! surface can (de)serialize them without duplicating shapes.

mod features;
mod importance;
mod performance;
mod prediction;

pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, FormInput, LoyaltyFlag};
pub use importance::{FeatureImportance, default_feature_importance};
pub use performance::{PerformanceSlice, PerformanceSummary};
pub use prediction::{PredictRequest, PredictResponse, PredictionLabel};

/// Endpoint paths, relative to the service base URL.
pub mod endpoints {
    pub const PREDICT: &str = "/predict";
    pub const PERFORMANCE: &str = "/performance";
    pub const IMPORTANCE: &str = "/importance";
}
