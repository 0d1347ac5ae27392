//! Error responses of the upload endpoint.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use encom_core::{EncomError, ExtractionError};

/// Failures reported to the client as plain-text bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file was uploaded.")]
    NoFile,

    #[error("No file was selected.")]
    NoSelection,

    #[error("Invalid file type. Please upload a PDF file.")]
    InvalidType,

    #[error(
        "No line items could be extracted from the PDF. \
         The document may not match the expected invoice layout."
    )]
    NoItems,

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Conversion failed: {0}")]
    Conversion(EncomError),

    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::NoSelection | ApiError::InvalidType | ApiError::NoItems => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Multipart(e) => e.status(),
            ApiError::Conversion(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EncomError> for ApiError {
    fn from(err: EncomError) -> Self {
        match err {
            EncomError::Extraction(ExtractionError::NoItems) => ApiError::NoItems,
            other => ApiError::Conversion(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Upload failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
