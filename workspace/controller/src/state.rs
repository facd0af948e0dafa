use std::collections::BTreeMap;

use common::{
    FeatureImportance, FeatureVector, FormInput, PerformanceSummary, PredictionLabel,
    default_feature_importance,
};
use tracing::{debug, warn};

use crate::error::{ApiError, FieldError, ValidationErrors};
use crate::form::{FormField, FormFields};

/// Notice surfaced to the user when a prediction request fails.
pub const PREDICTION_FAILED_NOTICE: &str = "Prediction request failed";

/// Load status of a chart dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Where the displayed feature ranking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    Service,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRanking {
    pub entries: Vec<FeatureImportance>,
    pub source: RankingSource,
}

impl FeatureRanking {
    pub fn from_service(entries: Vec<FeatureImportance>) -> Self {
        Self {
            entries,
            source: RankingSource::Service,
        }
    }

    pub fn fallback() -> Self {
        Self {
            entries: default_feature_importance(),
            source: RankingSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == RankingSource::Fallback
    }

    pub fn max_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).fold(0.0, f64::max)
    }
}

/// Lifecycle of the form. Validation runs synchronously inside a submit, so
/// it never shows up as a phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    PredictionShown,
}

/// Handle for one in-flight prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub features: FeatureVector,
}

/// Everything the dashboard renders, owned by one controller per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    form: FormFields,
    field_errors: BTreeMap<FormField, FieldError>,
    prediction: Option<PredictionLabel>,
    result_revision: u64,
    notice: Option<String>,
    performance: FetchState<PerformanceSummary>,
    importance: FetchState<FeatureRanking>,
    showing_result: bool,
    in_flight: usize,
    last_generation: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn field_error(&self, field: FormField) -> Option<&FieldError> {
        self.field_errors.get(&field)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.field_errors.values()
    }

    /// The persistent message under the loyalty field, if any.
    pub fn loyalty_error(&self) -> Option<String> {
        self.field_error(FormField::Loyalty).map(ToString::to_string)
    }

    /// Latest successful prediction. Never cleared once set.
    pub fn prediction(&self) -> Option<PredictionLabel> {
        self.prediction
    }

    /// Bumped on every successful prediction, even when the label repeats.
    pub fn result_revision(&self) -> u64 {
        self.result_revision
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn performance(&self) -> &FetchState<PerformanceSummary> {
        &self.performance
    }

    pub fn importance(&self) -> &FetchState<FeatureRanking> {
        &self.importance
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn phase(&self) -> FormPhase {
        if self.in_flight > 0 {
            FormPhase::Submitting
        } else if self.showing_result {
            FormPhase::PredictionShown
        } else {
            FormPhase::Editing
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.showing_result = false;
    }

    /// Validates the form and replaces the stored field errors with the result.
    pub fn validate(&mut self) -> Result<FormInput, ValidationErrors> {
        let outcome = self.form.validate();
        self.field_errors.clear();
        if let Err(errors) = &outcome {
            debug!(%errors, "form validation failed");
            self.showing_result = false;
            self.field_errors
                .extend(errors.errors().iter().map(|e| (e.field(), e.clone())));
        }
        outcome
    }

    /// Validates and, on success, registers a new in-flight request.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, ValidationErrors> {
        let input = self.validate()?;
        self.last_generation += 1;
        self.in_flight += 1;
        self.notice = None;
        let ticket = SubmitTicket {
            generation: self.last_generation,
            features: input.feature_vector(),
        };
        debug!(generation = ticket.generation, in_flight = self.in_flight, "submit started");
        Ok(ticket)
    }

    /// Applies a prediction response. Responses are applied in the order they
    /// resolve, so the last one to arrive is what stays on screen.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        result: Result<PredictionLabel, ApiError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation < self.last_generation {
            debug!(
                generation,
                latest = self.last_generation,
                "response resolved after a newer submit was issued"
            );
        }
        match result {
            Ok(label) => {
                self.prediction = Some(label);
                self.result_revision += 1;
                self.showing_result = true;
            }
            Err(err) => {
                warn!(generation, %err, "prediction request failed");
                self.notice = Some(PREDICTION_FAILED_NOTICE.to_string());
                self.showing_result = false;
            }
        }
    }

    pub fn start_performance_load(&mut self) {
        self.performance = FetchState::Loading;
    }

    /// A failed load leaves the chart empty.
    pub fn finish_performance_load(&mut self, result: Result<PerformanceSummary, ApiError>) {
        self.performance = match result {
            Ok(summary) => FetchState::Success(summary),
            Err(err) => FetchState::Error(err.to_string()),
        };
    }

    pub fn start_importance_load(&mut self) {
        self.importance = FetchState::Loading;
    }

    /// A failed load falls back to the default ranking so the chart is never empty.
    pub fn finish_importance_load(&mut self, result: Result<Vec<FeatureImportance>, ApiError>) {
        let ranking = match result {
            Ok(entries) => FeatureRanking::from_service(entries),
            Err(err) => {
                warn!(%err, "using default feature importance");
                FeatureRanking::fallback()
            }
        };
        self.importance = FetchState::Success(ranking);
    }
}
