use serde::{Deserialize, Serialize};

use crate::FeatureVector;

/// Request body for `POST /predict`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictRequest {
    pub features: FeatureVector,
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictResponse {
    pub prediction: PredictionLabel,
}

/// Binary purchase classification returned by the model.
///
/// Anything other than `0` or `1` is rejected while decoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "f64", into = "u8")]
pub enum PredictionLabel {
    WillNotPurchase,
    WillPurchase,
}

impl PredictionLabel {
    pub fn will_purchase(self) -> bool {
        matches!(self, Self::WillPurchase)
    }

    /// Message shown to the user for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            Self::WillPurchase => "✅ The customer will purchase!",
            Self::WillNotPurchase => "❌ The customer will not purchase.",
        }
    }
}

impl TryFrom<f64> for PredictionLabel {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Self::WillNotPurchase)
        } else if value == 1.0 {
            Ok(Self::WillPurchase)
        } else {
            Err(format!("prediction must be 0 or 1, got {value}"))
        }
    }
}

impl From<PredictionLabel> for u8 {
    fn from(label: PredictionLabel) -> Self {
        match label {
            PredictionLabel::WillNotPurchase => 0,
            PredictionLabel::WillPurchase => 1,
        }
    }
}
