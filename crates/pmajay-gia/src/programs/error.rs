use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::audit::AuditError;

/// Malformed or out-of-range input. Raised before any record is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid status '{0}'")]
    InvalidStatus(String),
    #[error("invalid verification status '{0}'")]
    InvalidVerificationStatus(String),
    #[error("completion_percentage must be an integer between 0 and 100 (found {0})")]
    CompletionOutOfRange(i64),
    #[error("approved_amount must be a non-negative number")]
    InvalidApprovedAmount,
    #[error("requested_amount must be greater than zero")]
    InvalidRequestedAmount,
    #[error("annual_income must be a non-negative number")]
    InvalidIncome,
    #[error("family_size must be at least 1")]
    InvalidFamilySize,
    #[error("age must be at least 1")]
    InvalidAge,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Aadhar number already registered")]
    DuplicateAadhar,
    #[error("transition from {from} to {to} is not permitted")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("approved_amount cannot be recorded while the project is {0}")]
    AmountWithoutApproval(&'static str),
    #[error("training program {0} is not open for enrollment")]
    ProgramClosed(String),
    #[error("training program {0} has no remaining capacity")]
    ProgramFull(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Storage failures surfaced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by every program service operation.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error("audit details could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProgramError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProgramError::Validation(_) => StatusCode::BAD_REQUEST,
            ProgramError::NotFound { .. } | ProgramError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            ProgramError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            ProgramError::Repository(RepositoryError::Unavailable(_))
            | ProgramError::Audit(_)
            | ProgramError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ProgramError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

impl IntoResponse for ProgramError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
