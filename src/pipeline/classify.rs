use crate::error::{ClassifierError, RecordingError};
use crate::model::Classifier;
use crate::pipeline::{features, parse};
use crate::types::features::{FeatureRow, FeatureVector};
use crate::types::outcome::{ClassificationOutcome, Label};

/// Runs one recording through parsing, feature extraction and the
/// classifier. Every failure becomes a [`ClassificationOutcome::Failure`];
/// the classifier is not called when parsing or extraction fails.
pub fn classify(
    filename: &str,
    bytes: &[u8],
    classifier: &dyn Classifier,
) -> ClassificationOutcome {
    match run(bytes, classifier) {
        Ok((label, features)) => {
            tracing::debug!(
                "Classified {} as {} ({:.2} km, {:.2} min)",
                filename,
                label.as_str(),
                features.total_distance_km,
                features.duration_minutes
            );
            ClassificationOutcome::Success { label, features }
        }
        Err(err) => failure(filename, &err),
    }
}

pub(crate) fn failure(filename: &str, err: &RecordingError) -> ClassificationOutcome {
    tracing::warn!("Failed to classify {}: {}", filename, err);
    ClassificationOutcome::Failure {
        reason: err.to_string(),
    }
}

fn run(
    bytes: &[u8],
    classifier: &dyn Classifier,
) -> Result<(Label, FeatureVector), RecordingError> {
    let points = parse::parse(bytes)?;
    let features = features::extract(&points)?;

    let row = FeatureRow::from(&features);
    let prediction = classifier.predict(&row)?;
    let label = Label::from_prediction(prediction)
        .ok_or(ClassifierError::UnexpectedLabel(prediction))?;

    Ok((label, features))
}
