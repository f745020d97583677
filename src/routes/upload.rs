use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::batch::{self, BatchRequest};
use crate::state::AppState;
use crate::types::features::FeatureVector;
use crate::types::outcome::{BatchEntry, BatchResult, ClassificationOutcome, Label};
use crate::types::track::Recording;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-workout", post(upload_workout))
        .route("/upload-multiple", post(upload_multiple))
        .route("/upload-zip", post(upload_zip))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleResponse {
    pub result: Label,
    pub features: FeatureVector,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryResult {
    Real,
    Fake,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchEntryResponse {
    pub file: String,
    pub result: EntryResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchEntryResponse>,
}

impl From<BatchEntry> for BatchEntryResponse {
    fn from(entry: BatchEntry) -> Self {
        match entry.outcome {
            ClassificationOutcome::Success { label, features } => Self {
                file: entry.filename,
                result: match label {
                    Label::Real => EntryResult::Real,
                    Label::Fake => EntryResult::Fake,
                },
                features: Some(features),
                reason: None,
                tx_hash: None,
            },
            ClassificationOutcome::Failure { reason } => Self {
                file: entry.filename,
                result: EntryResult::Error,
                features: None,
                reason: Some(reason),
                tx_hash: None,
            },
        }
    }
}

impl From<BatchResult> for BatchResponse {
    fn from(result: BatchResult) -> Self {
        Self {
            results: result.into_entries().into_iter().map(Into::into).collect(),
        }
    }
}

/// Form parts shared by every upload endpoint.
#[derive(Default)]
struct UploadForm {
    files: Vec<Recording>,
    user_address: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read multipart field: {}", e))
        })? {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file bytes: {}", e))
                })?;
                form.files.push(Recording::new(filename, bytes.to_vec()));
            } else if name == "user_address" {
                form.user_address = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read user_address: {}", e))
                })?);
            }
        }

        Ok(form)
    }

    fn single(mut self) -> Result<(Recording, Option<String>), AppError> {
        if self.files.is_empty() {
            return Err(AppError::BadRequest("No file provided".to_string()));
        }
        Ok((self.files.swap_remove(0), self.user_address))
    }
}

async fn run_batch(state: &AppState, request: BatchRequest) -> Result<BatchResult, AppError> {
    let classifier = state.classifier();
    let result = tokio::task::spawn_blocking(move || batch::process(request, classifier.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("Classification task failed: {}", e)))??;
    Ok(result)
}

async fn upload_workout(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SingleResponse>, AppError> {
    let (recording, user_address) = UploadForm::read(multipart, "file").await?.single()?;

    tracing::info!(
        "Classifying {} for {}",
        recording.filename,
        user_address.as_deref().unwrap_or("anonymous")
    );

    let result = run_batch(&state, BatchRequest::Single(recording)).await?;
    let entry = result
        .into_entries()
        .pop()
        .ok_or_else(|| AppError::Internal("Classification produced no result".to_string()))?;

    match entry.outcome {
        ClassificationOutcome::Success { label, features } => {
            tracing::info!("{} classified as {}", entry.filename, label.as_str());
            Ok(Json(SingleResponse {
                result: label,
                features,
                tx_hash: None,
            }))
        }
        ClassificationOutcome::Failure { reason } => Err(AppError::Recording(reason)),
    }
}

async fn upload_multiple(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let form = UploadForm::read(multipart, "files").await?;
    if form.files.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()));
    }

    tracing::info!(
        "Classifying {} files for {}",
        form.files.len(),
        form.user_address.as_deref().unwrap_or("anonymous")
    );

    let result = run_batch(&state, BatchRequest::Multiple(form.files)).await?;
    log_summary(&result);
    Ok(Json(result.into()))
}

async fn upload_zip(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let (archive, user_address) = UploadForm::read(multipart, "file").await?.single()?;

    tracing::info!(
        "Expanding archive {} ({} bytes) for {}",
        archive.filename,
        archive.bytes.len(),
        user_address.as_deref().unwrap_or("anonymous")
    );

    let request = BatchRequest::Archive {
        bytes: archive.bytes,
        extension: state.config.recording_extension.clone(),
    };
    let result = run_batch(&state, request).await?;
    log_summary(&result);
    Ok(Json(result.into()))
}

fn log_summary(result: &BatchResult) {
    tracing::info!(
        "Batch complete: {} recordings, {} failed",
        result.len(),
        result.failures()
    );
}
