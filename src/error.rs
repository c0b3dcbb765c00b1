//! Error types for validation, report rendering and the HTTP surface.

use std::path::PathBuf;

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// ---

/// Why a survey submission was rejected. The display text is shown to the
/// user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ---
    #[error("Please enter a valid year for when the home was built.")]
    InvalidYearBuilt,

    #[error("Please enter a valid year for when the last HVAC upgrade was made.")]
    InvalidHvacYear,

    #[error("Please enter a valid number for the thickness of the insulation.")]
    InvalidInsulation,

    #[error("Please enter a valid number for the average energy consumption of the home.")]
    InvalidEnergyConsumption,

    #[error("Please enter a valid percentage of LED light bulbs.")]
    InvalidLedPercentage,

    #[error("Please choose one of the offered answers for {field}.")]
    InvalidChoice { field: &'static str, value: String },
}

/// Failures while loading the report template or producing the PDF.
#[derive(Debug, Error)]
pub enum ReportError {
    // ---
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run PDF renderer {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF renderer exited with {status}: {stderr}")]
    Renderer { status: String, stderr: String },

    #[error("PDF renderer produced no output")]
    EmptyOutput,

    #[error("PDF rendering task failed: {0}")]
    Task(String),
}

/// Request-level error returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    // ---
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("report generation failed: {0}")]
    Report(#[from] ReportError),

    /// The body could not be decoded into a submission at all.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    // ---
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_validation_maps_to_unprocessable() {
        // ---
        let err = AppError::from(ValidationError::InvalidYearBuilt);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_string(),
            "Please enter a valid year for when the home was built."
        );
    }

    #[test]
    fn test_report_failure_maps_to_server_error() {
        // ---
        let err = AppError::from(ReportError::EmptyOutput);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rejection_keeps_its_status() {
        // ---
        let err = AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".to_string(),
        };
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            err.to_string(),
            "Expected request with `Content-Type: application/json`"
        );
    }

    #[test]
    fn test_choice_message_names_field() {
        // ---
        let err = ValidationError::InvalidChoice {
            field: "windows",
            value: "Triple-pane".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Please choose one of the offered answers for windows."
        );
    }
}
