//! Random forest of regression trees.
//!
//! Each tree is a flat node array rooted at index 0. Split nodes send a row
//! left when `row[feature] <= threshold`. Children always sit at a higher
//! index than their parent, which [`RandomForest::validate`] enforces so
//! evaluation always terminates.

use house_price_models::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

use crate::{FeatureRow, ModelError, PriceModel};

/// One node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal decision node.
    Split {
        /// Column of the feature row to test.
        feature: usize,
        /// Rows with `row[feature] <= threshold` go left.
        threshold: f64,
        /// Index of the left child.
        left: usize,
        /// Index of the right child.
        right: usize,
    },
    /// Terminal node holding a predicted value.
    Leaf {
        /// Predicted price.
        value: f64,
    },
}

/// A single regression tree.
///
/// Well formed means non-empty, every split feature below
/// [`FEATURE_COUNT`], every child index greater than its parent's and in
/// bounds, and every leaf finite. Deserialized artifacts are checked by
/// [`crate::load_model`]; trees built in code should call
/// [`RegressionTree::validate`] before use. [`RegressionTree::evaluate`]
/// returns `NaN` for a tree that breaks these rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Nodes in index order; index 0 is the root.
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walks the tree from the root to a leaf.
    ///
    /// Assumes the tree passed [`RegressionTree::validate`]; a malformed
    /// tree yields `NaN` rather than looping.
    #[must_use]
    pub fn evaluate(&self, row: &FeatureRow) -> f64 {
        let mut idx = 0;
        while let Some(node) = self.nodes.get(idx) {
            match *node {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let next = if row.get(feature).is_some_and(|v| *v <= threshold) {
                        left
                    } else {
                        right
                    };
                    if next <= idx {
                        break;
                    }
                    idx = next;
                }
            }
        }
        f64::NAN
    }

    /// Checks that the tree is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_at(0)
    }

    fn validate_at(&self, tree_idx: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(invalid(format!("tree {tree_idx} has no nodes")));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!(
                            "tree {tree_idx} node {idx} has a non-finite leaf value"
                        )));
                    }
                }
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "tree {tree_idx} node {idx} splits on feature {feature}, \
                             but rows have {FEATURE_COUNT} columns"
                        )));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "tree {tree_idx} node {idx} has out-of-order child {child}"
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// A bagged ensemble whose prediction is the mean of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Member trees.
    pub trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Checks that the forest is non-empty and every tree is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(invalid("random forest has no trees".to_string()));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate_at(idx)?;
        }
        Ok(())
    }
}

impl PriceModel for RandomForest {
    #[allow(clippy::cast_precision_loss)]
    fn predict_row(&self, row: &FeatureRow) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(row)).sum();
        sum / self.trees.len() as f64
    }
}

const fn invalid(message: String) -> ModelError {
    ModelError::Invalid { message }
}
