use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, StartupError};
use crate::model::Classifier;
use crate::types::features::FeatureRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub trees: Vec<TreeArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Probability of the genuine class.
        value: f64,
    },
}

/// Tree ensemble read from a JSON artifact. Each tree votes with the
/// probability stored in the leaf it reaches; the mean decides the label.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    feature_names: Vec<String>,
    trees: Vec<TreeArtifact>,
}

impl ForestClassifier {
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = std::fs::read(path).map_err(|source| StartupError::ReadModel {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_slice(&raw).map_err(|source| StartupError::DecodeModel {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, StartupError> {
        if artifact.feature_names.is_empty() {
            return Err(StartupError::InvalidModel("no feature names".to_string()));
        }
        if artifact
            .feature_names
            .iter()
            .any(|name| name == "activity_timestamp")
        {
            return Err(StartupError::InvalidModel(
                "activity_timestamp cannot be a model feature".to_string(),
            ));
        }
        if artifact.trees.is_empty() {
            return Err(StartupError::InvalidModel("no trees".to_string()));
        }

        for (tree_idx, tree) in artifact.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(StartupError::InvalidModel(format!(
                    "tree {} has no nodes",
                    tree_idx
                )));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                else {
                    continue;
                };
                if *feature >= artifact.feature_names.len() {
                    return Err(StartupError::InvalidModel(format!(
                        "tree {} node {} references unknown feature {}",
                        tree_idx, node_idx, feature
                    )));
                }
                // Children must point forward, which also rules out cycles.
                for child in [*left, *right] {
                    if child <= node_idx || child >= tree.nodes.len() {
                        return Err(StartupError::InvalidModel(format!(
                            "tree {} node {} has invalid child {}",
                            tree_idx, node_idx, child
                        )));
                    }
                }
            }
        }

        Ok(Self {
            feature_names: artifact.feature_names,
            trees: artifact.trees,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn row_values(&self, row: &FeatureRow) -> Result<Vec<f64>, ClassifierError> {
        self.feature_names
            .iter()
            .map(|name| {
                let value = row
                    .get(name)
                    .ok_or_else(|| ClassifierError::MissingFeature(name.clone()))?;
                if !value.is_finite() {
                    return Err(ClassifierError::NonFinite {
                        name: name.clone(),
                        value,
                    });
                }
                Ok(value)
            })
            .collect()
    }

    pub fn probability(&self, row: &FeatureRow) -> Result<f64, ClassifierError> {
        let values = self.row_values(row)?;
        let total: f64 = self.trees.iter().map(|tree| walk(tree, &values)).sum();
        Ok(total / self.trees.len() as f64)
    }
}

fn walk(tree: &TreeArtifact, values: &[f64]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if values[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<u8, ClassifierError> {
        let probability = self.probability(row)?;
        Ok(u8::from(probability > 0.5))
    }
}
