mod forest;

use crate::error::ClassifierError;
use crate::types::features::FeatureRow;

pub use forest::{ForestClassifier, ModelArtifact, TreeArtifact, TreeNode};

/// A pre-trained binary predictor. `1` means the recording is genuine, `0`
/// that it was fabricated.
///
/// Implementations are shared read-only across requests and batch workers.
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<u8, ClassifierError>;
}
