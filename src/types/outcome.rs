use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn from_prediction(prediction: u8) -> Option<Self> {
        match prediction {
            1 => Some(Label::Real),
            0 => Some(Label::Fake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "REAL",
            Label::Fake => "FAKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    Success {
        label: Label,
        features: FeatureVector,
    },
    Failure {
        reason: String,
    },
}

impl ClassificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClassificationOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub filename: String,
    pub outcome: ClassificationOutcome,
}

/// Per-recording outcomes in discovery order. Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filename: impl Into<String>, outcome: ClassificationOutcome) {
        self.entries.push(BatchEntry {
            filename: filename.into(),
            outcome,
        });
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.outcome.is_success())
            .count()
    }

    pub fn into_entries(self) -> Vec<BatchEntry> {
        self.entries
    }
}

impl FromIterator<BatchEntry> for BatchResult {
    fn from_iter<I: IntoIterator<Item = BatchEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
