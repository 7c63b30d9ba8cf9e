//! 分类模型
//!
//! 随机森林与多项逻辑回归两种模型，均以 JSON 形式持久化。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// 决策树节点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// `x[feature] <= threshold` 走左子树
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// 叶子节点的类别分布（未归一化）
    Leaf { value: Vec<f64> },
}

/// 决策树，根节点下标为 0
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// 返回归一化后的类别概率
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        let mut index = 0;
        // 有效的树深度不超过节点数
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).copied().ok_or_else(|| {
                        AppError::InvalidArtifact(format!("split feature {} out of range", feature))
                    })?;
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => {
                    let total: f64 = value.iter().sum();
                    if total <= 0.0 {
                        return Err(AppError::InvalidArtifact("empty leaf distribution".into()));
                    }
                    return Ok(value.iter().map(|v| v / total).collect());
                }
                None => {
                    return Err(AppError::InvalidArtifact(format!(
                        "tree node {} does not exist",
                        index
                    )));
                }
            }
        }
        Err(AppError::InvalidArtifact("decision tree contains a cycle".into()))
    }

    /// 所有节点引用的最大特征下标
    fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }
}

/// 持久化的分类模型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    RandomForest {
        /// 概率列对应的训练标签
        classes: Vec<i64>,
        n_features: usize,
        trees: Vec<DecisionTree>,
    },
    Logistic {
        classes: Vec<i64>,
        /// 每个类别一行系数
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

impl ClassifierModel {
    pub fn classes(&self) -> &[i64] {
        match self {
            ClassifierModel::RandomForest { classes, .. } => classes,
            ClassifierModel::Logistic { classes, .. } => classes,
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ClassifierModel::RandomForest { n_features, .. } => *n_features,
            ClassifierModel::Logistic { coefficients, .. } => {
                coefficients.first().map(|r| r.len()).unwrap_or(0)
            }
        }
    }

    /// 校验模型结构自洽
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.classes().len();
        if n_classes == 0 {
            return Err(AppError::InvalidArtifact("model has no classes".into()));
        }

        match self {
            ClassifierModel::RandomForest {
                n_features, trees, ..
            } => {
                if trees.is_empty() {
                    return Err(AppError::InvalidArtifact("forest has no trees".into()));
                }
                for tree in trees {
                    if tree.max_feature().is_some_and(|f| f >= *n_features) {
                        return Err(AppError::InvalidArtifact(
                            "tree references unknown feature".into(),
                        ));
                    }
                    let bad_leaf = tree.nodes.iter().any(|n| {
                        matches!(n, TreeNode::Leaf { value } if value.len() != n_classes)
                    });
                    if bad_leaf {
                        return Err(AppError::InvalidArtifact(
                            "leaf distribution does not match class count".into(),
                        ));
                    }
                }
            }
            ClassifierModel::Logistic {
                coefficients,
                intercepts,
                ..
            } => {
                let width = self.n_features();
                if coefficients.len() != n_classes
                    || intercepts.len() != n_classes
                    || coefficients.iter().any(|r| r.len() != width)
                {
                    return Err(AppError::InvalidArtifact(
                        "logistic coefficients do not match class count".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// 计算类别概率，列顺序与 `classes()` 一致
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        match self {
            ClassifierModel::RandomForest { classes, trees, .. } => {
                let mut sum = vec![0.0; classes.len()];
                for tree in trees {
                    for (s, p) in sum.iter_mut().zip(tree.predict_proba(x)?) {
                        *s += p;
                    }
                }
                let n = trees.len() as f64;
                Ok(sum.into_iter().map(|s| s / n).collect())
            }
            ClassifierModel::Logistic {
                coefficients,
                intercepts,
                ..
            } => {
                let logits: Vec<f64> = coefficients
                    .iter()
                    .zip(intercepts)
                    .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
                    .collect();
                Ok(softmax(&logits))
            }
        }
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// 最大概率的下标，并列时取第一个
pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best_v), (i, v)| {
            if *v > best_v { (i, *v) } else { (best_i, best_v) }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    value: vec![8.0, 2.0, 0.0],
                },
                TreeNode::Leaf {
                    value: vec![0.0, 1.0, 3.0],
                },
            ],
        }
    }

    #[test]
    fn test_tree_routes_on_threshold() {
        let tree = stump();
        assert_eq!(tree.predict_proba(&[0.0]).unwrap(), vec![0.8, 0.2, 0.0]);
        assert_eq!(tree.predict_proba(&[0.5]).unwrap(), vec![0.0, 0.25, 0.75]);
    }

    #[test]
    fn test_forest_averages_trees() {
        let model = ClassifierModel::RandomForest {
            classes: vec![0, 1, 2],
            n_features: 1,
            trees: vec![
                stump(),
                DecisionTree {
                    nodes: vec![TreeNode::Leaf {
                        value: vec![0.0, 0.0, 1.0],
                    }],
                },
            ],
        };
        model.validate().unwrap();

        let proba = model.predict_proba(&[1.0]).unwrap();
        assert!((proba[2] - 0.875).abs() < 1e-12);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_softmax_sums_to_one() {
        let model = ClassifierModel::Logistic {
            classes: vec![0, 1],
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            intercepts: vec![0.0, 0.0],
        };
        model.validate().unwrap();

        let proba = model.predict_proba(&[2.0, 0.0]).unwrap();
        assert!(proba[0] > proba[1]);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_inconsistent_models() {
        let model = ClassifierModel::RandomForest {
            classes: vec![0, 1],
            n_features: 1,
            trees: vec![stump()],
        };
        assert!(matches!(model.validate(), Err(AppError::InvalidArtifact(_))));

        let model = ClassifierModel::RandomForest {
            classes: vec![0, 1, 2],
            n_features: 1,
            trees: vec![],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_missing_node_is_reported() {
        let tree = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 5,
                right: 6,
            }],
        };
        assert!(tree.predict_proba(&[0.0]).is_err());
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), 0);
        assert_eq!(argmax(&[0.1, 0.3, 0.6]), 2);
    }

    #[test]
    fn test_model_json_roundtrip_tags() {
        let model = ClassifierModel::Logistic {
            classes: vec![0],
            coefficients: vec![vec![0.5]],
            intercepts: vec![0.0],
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["kind"], "logistic");
    }
}
