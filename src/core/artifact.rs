//! 磁碟上的模型檔格式與推論。
//!
//! 每個模型檔是一份 JSON：
//!
//! ```json
//! {
//!   "condition": "heart",
//!   "features": ["age", "sex", "cp", ...],
//!   "estimator": { "kind": "logistic_regression", "coefficients": [...], "intercept": -0.4 }
//! }
//! ```
//!
//! `features` 記錄訓練時的欄位順序，載入時必須與 [`feature_spec`] 完全一致。
//! 支援的 estimator：`logistic_regression`、`linear_svm`、`decision_tree`、
//! `random_forest`。判定規則與 scikit-learn 的 `predict` 相同（平手歸類為 0）。

use crate::domain::features::feature_spec;
use crate::domain::model::{Condition, FeatureVector, Label};
use crate::domain::ports::Classifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("invalid artifact JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("artifact was trained for '{found}', expected '{expected}'")]
    ConditionMismatch {
        expected: Condition,
        found: Condition,
    },

    #[error("artifact declares {found} features, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("feature order mismatch at position {position}: expected '{expected}', found '{found}'")]
    FeatureOrder {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("estimator has {found} coefficients, expected {expected}")]
    CoefficientCount { expected: usize, found: usize },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("decision tree has no nodes")]
    EmptyTree,

    #[error("random forest has no trees")]
    EmptyForest,

    #[error("node {node} splits on feature {feature}, but only {n_features} features exist")]
    FeatureIndex {
        node: usize,
        feature: usize,
        n_features: usize,
    },

    #[error("node {node} points to child {child}; children must follow their parent and exist")]
    ChildIndex { node: usize, child: usize },

    #[error("leaf {node} probability {value} is outside [0, 1]")]
    Probability { node: usize, value: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub condition: Condition,
    pub features: Vec<String>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    LinearSvm {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    DecisionTree(DecisionTree),
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// `x[feature] <= threshold` 走左邊
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// 類別 1 的機率
    Leaf { probability: f64 },
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::EmptyTree);
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(ArtifactError::FeatureIndex {
                            node: idx,
                            feature,
                            n_features,
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::NonFinite("split threshold"));
                    }
                    // 子節點索引必須大於父節點，保證走訪一定會結束
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ArtifactError::ChildIndex { node: idx, child });
                        }
                    }
                }
                TreeNode::Leaf { probability } => {
                    if !(0.0..=1.0).contains(&probability) {
                        return Err(ArtifactError::Probability {
                            node: idx,
                            value: probability,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn probability(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { probability } => return probability,
            }
        }
    }
}

fn check_linear(
    coefficients: &[f64],
    intercept: f64,
    n_features: usize,
) -> Result<(), ArtifactError> {
    if coefficients.len() != n_features {
        return Err(ArtifactError::CoefficientCount {
            expected: n_features,
            found: coefficients.len(),
        });
    }
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ArtifactError::NonFinite("coefficients"));
    }
    if !intercept.is_finite() {
        return Err(ArtifactError::NonFinite("intercept"));
    }
    Ok(())
}

fn decision_function(coefficients: &[f64], intercept: f64, x: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(x)
        .map(|(w, v)| w * v)
        .sum::<f64>()
        + intercept
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::LinearSvm { .. } => "linear_svm",
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        match self {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
                threshold,
            } => {
                check_linear(coefficients, *intercept, n_features)?;
                if !threshold.is_finite() {
                    return Err(ArtifactError::NonFinite("threshold"));
                }
                Ok(())
            }
            Estimator::LinearSvm {
                coefficients,
                intercept,
            } => check_linear(coefficients, *intercept, n_features),
            Estimator::DecisionTree(tree) => tree.validate(n_features),
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactError::EmptyForest);
                }
                trees.iter().try_for_each(|t| t.validate(n_features))
            }
        }
    }

    fn predict(&self, x: &[f64]) -> Label {
        match self {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
                threshold,
            } => {
                let z = decision_function(coefficients, *intercept, x);
                let p = 1.0 / (1.0 + (-z).exp());
                Label::from(p > *threshold)
            }
            Estimator::LinearSvm {
                coefficients,
                intercept,
            } => Label::from(decision_function(coefficients, *intercept, x) > 0.0),
            Estimator::DecisionTree(tree) => Label::from(tree.probability(x) > 0.5),
            Estimator::RandomForest { trees } => {
                let mean = trees.iter().map(|t| t.probability(x)).sum::<f64>() / trees.len() as f64;
                Label::from(mean > 0.5)
            }
        }
    }
}

/// 驗證過的模型；載入後唯讀
#[derive(Debug, Clone)]
pub struct Model {
    condition: Condition,
    estimator: Estimator,
}

impl Model {
    pub fn from_slice(expected: Condition, bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(expected, artifact)
    }

    pub fn from_artifact(expected: Condition, artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.condition != expected {
            return Err(ArtifactError::ConditionMismatch {
                expected,
                found: artifact.condition,
            });
        }

        let spec = feature_spec(expected);
        if artifact.features.len() != spec.len() {
            return Err(ArtifactError::FeatureCount {
                expected: spec.len(),
                found: artifact.features.len(),
            });
        }

        for (position, (expected_name, found)) in spec.names().zip(&artifact.features).enumerate() {
            if expected_name != found.as_str() {
                return Err(ArtifactError::FeatureOrder {
                    position,
                    expected: expected_name,
                    found: found.clone(),
                });
            }
        }

        artifact.estimator.validate(spec.len())?;

        Ok(Self {
            condition: expected,
            estimator: artifact.estimator,
        })
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }
}

// 呼叫端必須傳入同一疾病、長度符合的向量（`ModelRegistry::classify` 會先檢查）
impl Classifier for Model {
    fn classify(&self, vector: &FeatureVector) -> Label {
        debug_assert_eq!(vector.condition(), self.condition);
        debug_assert_eq!(vector.len(), feature_spec(self.condition).len());
        self.estimator.predict(vector.values())
    }
}
