use serde::{Deserialize, Serialize};

/// Confusion-matrix counts of the model on its held-out sample,
/// as returned by `GET /performance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PerformanceSummary {
    #[serde(rename = "TP")]
    pub true_positives: u64,
    #[serde(rename = "TN")]
    pub true_negatives: u64,
    #[serde(rename = "FP")]
    pub false_positives: u64,
    #[serde(rename = "FN")]
    pub false_negatives: u64,
}

/// One segment of the performance pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSlice {
    pub label: &'static str,
    pub count: u64,
    pub color: &'static str,
}

impl PerformanceSummary {
    /// Size of the evaluated sample, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.true_positives
            .saturating_add(self.true_negatives)
            .saturating_add(self.false_positives)
            .saturating_add(self.false_negatives)
    }

    /// Share of correct classifications, `None` for an empty sample.
    pub fn accuracy(&self) -> Option<f64> {
        let correct = self.true_positives as f64 + self.true_negatives as f64;
        let total = correct + self.false_positives as f64 + self.false_negatives as f64;
        if total == 0.0 {
            return None;
        }
        Some(correct / total)
    }

    /// Chart segments in fixed display order.
    pub fn slices(&self) -> [PerformanceSlice; 4] {
        [
            PerformanceSlice {
                label: "True Positives",
                count: self.true_positives,
                color: "#A0E7A0",
            },
            PerformanceSlice {
                label: "True Negatives",
                count: self.true_negatives,
                color: "#66D9A0",
            },
            PerformanceSlice {
                label: "False Positives",
                count: self.false_positives,
                color: "#FFB3B3",
            },
            PerformanceSlice {
                label: "False Negatives",
                count: self.false_negatives,
                color: "#FF8A8A",
            },
        ]
    }
}
