use async_trait::async_trait;
use common::{FeatureImportance, FeatureVector, PerformanceSummary, PredictionLabel};

use crate::error::Result;

/// The remote scoring service.
///
/// Implemented over `gloo-net` in the browser and over `ureq` natively. The
/// service is single-threaded from the controller's point of view, so the
/// returned futures need not be `Send`.
#[async_trait(?Send)]
pub trait ScoringApi {
    /// `POST /predict`
    async fn predict(&self, features: &FeatureVector) -> Result<PredictionLabel>;

    /// `GET /performance`
    async fn performance(&self) -> Result<PerformanceSummary>;

    /// `GET /importance`, failing on any non-success status.
    async fn importance(&self) -> Result<Vec<FeatureImportance>>;
}
