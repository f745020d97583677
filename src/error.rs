use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid GPX: {0}")]
    InvalidGpx(String),
    #[error("Invalid GPX: document is empty")]
    EmptyDocument,
    #[error("Invalid GPX: expected <gpx> root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("Invalid GPX: document ended before </gpx>")]
    Truncated,
    #[error("Invalid GPX: track point {index} has invalid {field}: {value:?}")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid GPX: track point {index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("No track/segment found in GPX file.")]
    NoUsableSegment,
}

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("Not enough points to calculate features.")]
    InsufficientPoints(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Invalid archive: {0}")]
    Open(String),
    #[error("Failed to extract archive: {0}")]
    Extract(String),
    #[error("Failed to prepare extraction workspace: {0}")]
    Workspace(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier rejected feature row: missing feature '{0}'")]
    MissingFeature(String),
    #[error("Classifier rejected feature row: '{name}' is not finite ({value})")]
    NonFinite { name: String, value: f64 },
    #[error("Classifier returned unexpected label {0}")]
    UnexpectedLabel(u8),
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to read model artifact {path}: {source}")]
    ReadModel {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode model artifact {path}: {source}")]
    DecodeModel {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),
}

/// Every way a single recording can fail. The `Display` text is the
/// reason carried by a failed outcome.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("Failed to read extracted file: {0}")]
    Read(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Recording(String),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Recording(_) | AppError::Archive(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
