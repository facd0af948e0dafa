use std::cell::{Ref, RefCell};

use common::{FormInput, PredictionLabel};
use tracing::{debug, error, info, instrument};

use crate::api::ScoringApi;
use crate::error::{ApiError, ValidationErrors};
use crate::form::FormField;
use crate::state::DashboardState;

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationErrors),
    Predicted(PredictionLabel),
    Failed(ApiError),
}

/// Drives a [`DashboardState`] against a [`ScoringApi`].
///
/// All operations take `&self` so a submit and both chart loads can be in
/// flight together on a single task. The state borrow is never held across
/// an await point.
pub struct PredictionController<A> {
    api: A,
    state: RefCell<DashboardState>,
    listener: Option<Box<dyn Fn()>>,
}

impl<A: ScoringApi> PredictionController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RefCell::new(DashboardState::new()),
            listener: None,
        }
    }

    /// Registers a callback invoked after every state change.
    pub fn with_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn state(&self) -> Ref<'_, DashboardState> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let result = f(&mut *self.state.borrow_mut());
        if let Some(listener) = &self.listener {
            listener();
        }
        result
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.set_field(field, value));
    }

    /// Runs validation without submitting, updating the field errors.
    pub fn validate(&self) -> Result<FormInput, ValidationErrors> {
        self.update(DashboardState::validate)
    }

    /// Validates the form and sends the feature vector to the service.
    ///
    /// Failures leave the previous prediction in place and raise the
    /// failure notice. Nothing is retried.
    #[instrument(skip(self))]
    pub async fn submit_prediction(&self) -> PredictionOutcome {
        let ticket = match self.update(DashboardState::begin_submit) {
            Ok(ticket) => ticket,
            Err(errors) => {
                info!(%errors, "submission blocked by validation");
                return PredictionOutcome::Rejected(errors);
            }
        };

        let named: Vec<_> = ticket.features.named().collect();
        debug!(generation = ticket.generation, features = ?named, "sending prediction request");
        let result = self.api.predict(&ticket.features).await;

        let outcome = match &result {
            Ok(label) => {
                info!(generation = ticket.generation, label = ?label, "prediction received");
                PredictionOutcome::Predicted(*label)
            }
            Err(err) => {
                error!(generation = ticket.generation, %err, "prediction request failed");
                PredictionOutcome::Failed(err.clone())
            }
        };
        self.update(|state| state.finish_submit(ticket.generation, result));
        outcome
    }

    /// Loads the confusion-matrix counts. A failure leaves the chart empty.
    #[instrument(skip(self))]
    pub async fn load_performance_summary(&self) {
        self.update(DashboardState::start_performance_load);
        let result = self.api.performance().await;
        match &result {
            Ok(summary) => info!(total = summary.total(), "performance summary loaded"),
            Err(err) => error!(%err, "failed to fetch model performance"),
        }
        self.update(|state| state.finish_performance_load(result));
    }

    /// Loads the feature ranking, falling back to the default one on failure.
    #[instrument(skip(self))]
    pub async fn load_feature_importance(&self) {
        self.update(DashboardState::start_importance_load);
        let result = self.api.importance().await;
        match &result {
            Ok(entries) => info!(count = entries.len(), "feature importance loaded"),
            Err(err) => error!(%err, "failed to fetch feature importance"),
        }
        self.update(|state| state.finish_importance_load(result));
    }
}
