//! Timeline error types.
//!
//! Structural edits never fail; out-of-range indices and unknown ids are
//! no-ops. Only keyword validation and external service calls produce errors.

use serde::Serialize;
use thiserror::Error;

/// Result type for external service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Why a keyword candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum KeywordConflict {
    #[error("Keyword is empty")]
    Empty,

    #[error("Keyword already highlighted: {existing}")]
    ExactDuplicate { existing: String },

    #[error("Keyword contains highlighted keyword: {existing}")]
    ContainsExisting { existing: String },

    #[error("Keyword is part of highlighted keyword: {existing}")]
    ContainedInExisting { existing: String },
}

impl KeywordConflict {
    /// Reason code shown to the caller.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordConflict::Empty => "empty",
            KeywordConflict::ExactDuplicate { .. } => "exact_duplicate",
            KeywordConflict::ContainsExisting { .. } => "contains_existing",
            KeywordConflict::ContainedInExisting { .. } => "contained_in_existing",
        }
    }

    /// The highlighted keyword the candidate collided with.
    pub fn existing(&self) -> Option<&str> {
        match self {
            KeywordConflict::Empty => None,
            KeywordConflict::ExactDuplicate { existing }
            | KeywordConflict::ContainsExisting { existing }
            | KeywordConflict::ContainedInExisting { existing } => Some(existing),
        }
    }
}

/// Errors returned by media search and narration variation services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service returned no results")]
    Empty,

    #[error("Scene no longer in timeline: {0}")]
    StaleScene(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Check if the caller may retry the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_) | ServiceError::RequestFailed(_))
    }
}
