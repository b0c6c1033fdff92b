//! Decision tree and random forest
//!
//! Nodes are stored flat, root first. A split sends a row left when
//! `row[feature] <= threshold`. Children always sit after their parent, so
//! traversal cannot loop.

use serde::Deserialize;

use super::{argmax, FeatureRow, ModelError, FEATURE_COUNT};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Per-class weight (sample counts or fractions)
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>, n_classes: usize) -> Result<Self, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::InvalidArtifact("tree has no nodes".to_string()));
        }

        for (i, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, left, right, .. } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::InvalidArtifact(format!(
                            "node {} splits on feature {}, only {} features exist",
                            i, feature, FEATURE_COUNT
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= nodes.len() {
                            return Err(ModelError::InvalidArtifact(format!(
                                "node {} has invalid child {}",
                                i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::InvalidArtifact(format!(
                            "leaf {} has {} values, expected {}",
                            i,
                            value.len(),
                            n_classes
                        )));
                    }
                }
            }
        }

        Ok(Self { nodes })
    }

    /// Leaf weights reached by `row`
    fn leaf(&self, row: &FeatureRow) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split { feature, threshold, left, right } => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    /// Leaf weights normalised to sum to one
    fn proba(&self, row: &FeatureRow) -> Vec<f64> {
        let value = self.leaf(row);
        let total: f64 = value.iter().sum();
        if total > 0.0 {
            value.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; value.len()]
        }
    }

    pub fn predict_index(&self, row: &FeatureRow) -> usize {
        argmax(self.leaf(row))
    }
}

/// Soft-voting ensemble of trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(trees: Vec<Vec<TreeNode>>, n_classes: usize) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".to_string()));
        }

        let trees = trees
            .into_iter()
            .map(|nodes| DecisionTree::new(nodes, n_classes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { trees, n_classes })
    }

    pub fn predict_index(&self, row: &FeatureRow) -> usize {
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.proba(row)) {
                *acc += p;
            }
        }
        // Dividing by the tree count does not change the argmax
        argmax(&mean)
    }
}
