//! Plain-text rendering of the dashboard sections.

use std::fmt::Write;

use common::PerformanceSummary;
use controller::{DashboardState, FeatureRanking, FetchState};

const BAR_WIDTH: usize = 30;

pub fn render_prediction(state: &DashboardState) -> String {
    let mut out = String::new();
    if let Some(label) = state.prediction() {
        let _ = writeln!(out, "{}", label.message());
    }
    if let Some(notice) = state.notice() {
        let _ = writeln!(out, "⚠ {}", notice);
    }
    out
}

/// Field errors, one per line.
pub fn render_field_errors(state: &DashboardState) -> String {
    let mut out = String::new();
    for error in state.field_errors() {
        let _ = writeln!(out, "{}: {}", error.field(), error);
    }
    out
}

pub fn render_performance(performance: &FetchState<PerformanceSummary>) -> String {
    let mut out = String::new();
    match performance.data() {
        Some(summary) => {
            let total = summary.total();
            let _ = writeln!(out, "📊 Model Performance ({} samples)", total);
            for slice in summary.slices() {
                let share = if total == 0 {
                    0.0
                } else {
                    slice.count as f64 * 100.0 / total as f64
                };
                let _ = writeln!(out, "  {:<16} {:>6}  {:>5.1}%", slice.label, slice.count, share);
            }
            if let Some(accuracy) = summary.accuracy() {
                let _ = writeln!(out, "  Accuracy: {:.1}%", accuracy * 100.0);
            }
        }
        None => {
            let _ = writeln!(out, "📊 Model Performance");
            let _ = writeln!(out, "  (no data)");
        }
    }
    out
}

pub fn render_importance(importance: &FetchState<FeatureRanking>) -> String {
    let mut out = String::new();
    let _ = write!(out, "📈 Feature Importance");
    match importance.data() {
        Some(ranking) => {
            if ranking.is_fallback() {
                let _ = write!(out, " (default ranking)");
            }
            let _ = writeln!(out);
            let width = ranking
                .entries
                .iter()
                .map(|e| e.feature_name.chars().count())
                .max()
                .unwrap_or(0);
            let max = ranking.max_weight();
            for entry in &ranking.entries {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:<bar$}  {:.2}",
                    entry.feature_name,
                    bar(entry.weight, max),
                    entry.weight,
                    width = width,
                    bar = BAR_WIDTH,
                );
            }
        }
        None => {
            let _ = writeln!(out);
            let _ = writeln!(out, "  (no data)");
        }
    }
    out
}

pub fn render_dashboard(state: &DashboardState) -> String {
    let mut sections = Vec::new();
    let prediction = render_prediction(state);
    if !prediction.is_empty() {
        sections.push(prediction);
    }
    sections.push(render_performance(state.performance()));
    sections.push(render_importance(state.importance()));
    sections.join("\n")
}

fn bar(weight: f64, max: f64) -> String {
    if max <= 0.0 || weight <= 0.0 {
        return String::new();
    }
    let filled = ((weight / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{FeatureImportance, PredictionLabel};
    use controller::{ApiError, FormField};

    #[test]
    fn test_render_prediction_and_notice() {
        let mut state = DashboardState::new();
        state.set_field(FormField::Age, "27");
        state.set_field(FormField::Purchases, "11");
        state.set_field(FormField::Loyalty, "1");
        state.set_field(FormField::Discounts, "0");
        let ticket = state.begin_submit().unwrap();
        state.finish_submit(ticket.generation, Ok(PredictionLabel::WillPurchase));
        assert_eq!(render_prediction(&state), "✅ The customer will purchase!\n");

        let ticket = state.begin_submit().unwrap();
        state.finish_submit(ticket.generation, Err(ApiError::Status(502)));
        let text = render_prediction(&state);
        assert!(text.contains("will purchase"));
        assert!(text.contains("Prediction request failed"));
    }

    #[test]
    fn test_render_field_errors() {
        let mut state = DashboardState::new();
        state.set_field(FormField::Age, "27");
        state.set_field(FormField::Purchases, "11");
        state.set_field(FormField::Loyalty, "7");
        state.set_field(FormField::Discounts, "0");
        assert!(state.validate().is_err());
        assert_eq!(render_field_errors(&state), "Loyalty: Loyalty must be 0 or 1.\n");
    }

    #[test]
    fn test_render_performance() {
        let summary = PerformanceSummary {
            true_positives: 620,
            true_negatives: 505,
            false_positives: 180,
            false_negatives: 195,
        };
        let text = render_performance(&FetchState::Success(summary));
        assert!(text.starts_with("📊 Model Performance (1500 samples)"));
        assert!(text.contains("True Positives"));
        assert!(text.contains("Accuracy: 75.0%"));
    }

    #[test]
    fn test_render_empty_performance() {
        let text = render_performance(&FetchState::Error("HTTP error: 500".to_string()));
        assert!(text.contains("(no data)"));
        assert!(!text.contains("True Positives"));
    }

    #[test]
    fn test_render_importance_fallback() {
        let text = render_importance(&FetchState::Success(FeatureRanking::fallback()));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "📈 Feature Importance (default ranking)");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].trim_start().starts_with("purchases"));
        assert!(lines[1].contains(&"█".repeat(BAR_WIDTH)));
        assert!(lines[5].trim_start().starts_with("discounts"));
    }

    #[test]
    fn test_render_importance_from_service() {
        let ranking = FeatureRanking::from_service(vec![
            FeatureImportance::new("loyalty", 2.0),
            FeatureImportance::new("age", 1.0),
        ]);
        let text = render_importance(&FetchState::Success(ranking));
        assert!(text.starts_with("📈 Feature Importance\n"));
        assert!(text.contains("2.00"));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(1.0, 2.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0001, 2.0).chars().count(), 1);
        assert_eq!(bar(0.0, 2.0), "");
    }
}
