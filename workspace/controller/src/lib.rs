//! The prediction form controller.
//!
//! Owns the raw form fields, validates them, derives the feature vector,
//! submits it through a [`ScoringApi`] and keeps the two chart datasets that
//! are loaded once per session. Rendering is left to the caller: the browser
//! frontend and the native CLI both drive the same [`PredictionController`].

mod api;
mod controller;
mod error;
mod form;
mod state;

pub use api::ScoringApi;
pub use controller::{PredictionController, PredictionOutcome};
pub use error::{ApiError, FieldError, Result, ValidationErrors};
pub use form::{FormField, FormFields};
pub use state::{
    DashboardState, FeatureRanking, FetchState, FormPhase, PREDICTION_FAILED_NOTICE,
    RankingSource, SubmitTicket,
};
