use rayon::prelude::*;

use crate::error::ArchiveError;
use crate::model::Classifier;
use crate::pipeline::{archive, classify};
use crate::types::outcome::{BatchEntry, BatchResult};
use crate::types::track::Recording;

/// The three shapes a classification request can take.
pub enum BatchRequest {
    Single(Recording),
    Multiple(Vec<Recording>),
    /// Raw archive bytes plus the suffix recordings must carry inside it.
    Archive { bytes: Vec<u8>, extension: String },
}

/// Classifies every recording of a request, one entry per recording in
/// discovery order. Items are processed in parallel but a failing item never
/// affects the others. Only an unreadable archive fails the whole request.
pub fn process(
    request: BatchRequest,
    classifier: &dyn Classifier,
) -> Result<BatchResult, ArchiveError> {
    match request {
        BatchRequest::Single(recording) => {
            let mut result = BatchResult::new();
            let outcome = classify::classify(&recording.filename, &recording.bytes, classifier);
            result.push(recording.filename, outcome);
            Ok(result)
        }
        BatchRequest::Multiple(recordings) => Ok(recordings
            .into_par_iter()
            .map(|recording| BatchEntry {
                outcome: classify::classify(&recording.filename, &recording.bytes, classifier),
                filename: recording.filename,
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()),
        BatchRequest::Archive { bytes, extension } => {
            let workspace = archive::expand(&bytes, &extension)?;
            if workspace.is_empty() {
                tracing::info!("Archive holds no {} recordings", extension);
            }
            let result = workspace
                .read_entries()
                .into_par_iter()
                .map(|(filename, bytes)| {
                    let outcome = match bytes {
                        Ok(bytes) => classify::classify(&filename, &bytes, classifier),
                        Err(err) => classify::failure(&filename, &err),
                    };
                    BatchEntry { filename, outcome }
                })
                .collect::<Vec<_>>()
                .into_iter()
                .collect();
            drop(workspace);
            Ok(result)
        }
    }
}
