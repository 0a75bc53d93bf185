//! Error types for the PDF form-fill service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// Every failure on the fill path maps to a plain-text HTTP response.
/// The message strings are part of the service contract, so callers can
/// match on them; `#[error]` carries the exact wording.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request body empty.")]
    EmptyBody,

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Request did not contain url for blank pdf.")]
    MissingTemplateUrl,

    #[error("Request did not contain PDF form data.")]
    MissingFormData,

    #[error("Could not download blank PDF: {0}")]
    Download(String),

    #[error("Could not read blank PDF: {0}")]
    Template(String),

    #[error("Failed to produce filled PDF: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error
    ///
    /// Everything a caller can fix (bad request, bad URL, corrupt
    /// template) is a 400; only serialization failures are a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!("{}", message);
        (self.status_code(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(AppError::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MissingTemplateUrl.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Download("timeout".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Template("not a pdf".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_is_500() {
        assert_eq!(
            AppError::Internal("write failed".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_contract_messages() {
        assert_eq!(AppError::EmptyBody.to_string(), "Request body empty.");
        assert_eq!(
            AppError::MissingTemplateUrl.to_string(),
            "Request did not contain url for blank pdf."
        );
        assert_eq!(
            AppError::MissingFormData.to_string(),
            "Request did not contain PDF form data."
        );
        assert_eq!(
            AppError::Download("404".to_string()).to_string(),
            "Could not download blank PDF: 404"
        );
    }
}
