use thiserror::Error;

use crate::form::FormField;

/// Failure talking to the scoring service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Type alias for Result with ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required.")]
    Missing(FormField),

    #[error("{0} must be a number.")]
    NotANumber(FormField),

    #[error("Loyalty must be 0 or 1.")]
    InvalidLoyalty,
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            Self::Missing(field) | Self::NotANumber(field) => *field,
            Self::InvalidLoyalty => FormField::Loyalty,
        }
    }
}

/// Every field that failed validation, in form order. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wraps the errors collected by a failed validation run.
    pub(crate) fn from_failed(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
