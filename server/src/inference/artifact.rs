//! JSON model artifact
//!
//! Exported from the training environment next to the fitted estimator.
//! Everything is validated here so prediction never has to.

use serde::Deserialize;

use super::layout::{self, FEATURE_COUNT};
use super::linear::LinearModel;
use super::tree::{DecisionTree, RandomForest, TreeNode};
use super::{Classifier, FeatureRow, ModelError, ModelInfo};

/// Artifact format understood by this server
pub const FORMAT_VERSION: u32 = 1;

/// Labels a model must predict: 0 is low risk, 1 is high risk
pub const BINARY_CLASSES: [i64; 2] = [0, 1];

#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    #[serde(flatten)]
    pub estimator: Estimator,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression { coef: Weights, intercept: Bias },
    DecisionTree { nodes: Vec<TreeNode> },
    RandomForest { trees: Vec<Vec<TreeNode>> },
}

/// `coef` as a flat vector or one row per class
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Weights {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// `intercept` as a scalar or one value per class
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Bias {
    Scalar(f64),
    Values(Vec<f64>),
}

impl Estimator {
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree { .. } => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }
}

/// Validated estimator ready for prediction
#[derive(Debug)]
pub enum Fitted {
    Linear(LinearModel),
    Tree(DecisionTree),
    Forest(RandomForest),
}

/// Classifier backed by a JSON artifact
#[derive(Debug)]
pub struct ArtifactClassifier {
    fitted: Fitted,
    classes: Vec<i64>,
    info: ModelInfo,
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Validate the artifact and build its classifier
    pub fn into_classifier(self, path: &str, sha256: String) -> Result<ArtifactClassifier, ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat(self.format_version));
        }

        if let Some((index, expected, found)) = layout::first_mismatch(&self.feature_names[..]) {
            return Err(ModelError::LayoutMismatch { index, expected, found });
        }

        if self.classes != BINARY_CLASSES {
            return Err(ModelError::InvalidArtifact(format!(
                "expected classes {:?}, got {:?}",
                BINARY_CLASSES, self.classes
            )));
        }
        let n_classes = BINARY_CLASSES.len();

        let model_type = self.estimator.name();
        let fitted = match self.estimator {
            Estimator::LogisticRegression { coef, intercept } => {
                Fitted::Linear(LinearModel::new(coef, intercept)?)
            }
            Estimator::DecisionTree { nodes } => {
                Fitted::Tree(DecisionTree::new(nodes, n_classes)?)
            }
            Estimator::RandomForest { trees } => {
                Fitted::Forest(RandomForest::new(trees, n_classes)?)
            }
        };

        let info = ModelInfo::new(model_type, path, self.classes.clone(), sha256);

        Ok(ArtifactClassifier {
            fitted,
            classes: self.classes,
            info,
        })
    }
}

impl Classifier for ArtifactClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ModelError> {
        let index = match &self.fitted {
            Fitted::Linear(model) => model.predict_index(row),
            Fitted::Tree(model) => model.predict_index(row),
            Fitted::Forest(model) => model.predict_index(row),
        };

        self.classes
            .get(index)
            .copied()
            .ok_or_else(|| ModelError::Inference(format!("class index {} out of range", index)))
    }

    fn info(&self) -> &ModelInfo {
        &self.info
    }
}

/// Convert a coefficient row into a fixed-size row, checking its length
pub(crate) fn to_row(values: Vec<f64>, what: &str) -> Result<FeatureRow, ModelError> {
    let len = values.len();
    values.try_into().map_err(|_| {
        ModelError::InvalidArtifact(format!(
            "{} has {} values, expected {}",
            what, len, FEATURE_COUNT
        ))
    })
}
