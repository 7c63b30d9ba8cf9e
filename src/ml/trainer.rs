//! 随机森林训练

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::config::TrainingConfig;
use crate::error::{AppError, Result};
use crate::ml::artifacts::ModelArtifacts;
use crate::ml::classifier::{ClassifierModel, DecisionTree, TreeNode, argmax};
use crate::ml::dataset::Dataset;
use crate::ml::scaler::StandardScaler;

/// 随机森林超参数
#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl From<&TrainingConfig> for ForestParams {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            n_estimators: config.n_estimators,
            max_depth: config.max_depth,
            seed: config.seed,
            ..Default::default()
        }
    }
}

/// 评估结果
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub classes: Vec<i64>,
    /// 行为真实标签，列为预测标签
    pub confusion_matrix: Vec<Vec<usize>>,
}

/// 训练流水线：划分 → 标准化 → 拟合 → 评估
pub struct ModelTrainer {
    params: ForestParams,
    test_size: f64,
}

impl ModelTrainer {
    pub fn new(params: ForestParams, test_size: f64) -> Self {
        Self { params, test_size }
    }

    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(ForestParams::from(config), config.test_size)
    }

    pub fn run(&self, dataset: &Dataset) -> Result<(ModelArtifacts, TrainingReport)> {
        let (train, test) = dataset.stratified_split(self.test_size, self.params.seed);
        info!("Train size: {}, Test size: {}", train.len(), test.len());

        let scaler = StandardScaler::fit(&train.rows)?;
        let train_scaled = scale_all(&scaler, &train.rows)?;

        info!(
            "Training RandomForest model ({} trees, max depth {})...",
            self.params.n_estimators, self.params.max_depth
        );
        let model = fit_forest(&train_scaled, &train.labels, &self.params)?;
        info!("Model training complete");

        let artifacts = ModelArtifacts::new(model, scaler, dataset.feature_columns.clone())?;
        let report = evaluate(&artifacts, &test, train.len())?;
        info!(
            "Model accuracy: {:.4} ({:.2}%)",
            report.accuracy,
            report.accuracy * 100.0
        );
        info!("Confusion matrix: {:?}", report.confusion_matrix);

        Ok((artifacts, report))
    }
}

fn scale_all(scaler: &StandardScaler, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    rows.iter().map(|r| scaler.transform(r)).collect()
}

fn evaluate(artifacts: &ModelArtifacts, test: &Dataset, train_size: usize) -> Result<TrainingReport> {
    let classes = artifacts.model.classes().to_vec();
    let mut confusion_matrix = vec![vec![0; classes.len()]; classes.len()];
    let mut correct = 0;

    for (row, label) in test.rows.iter().zip(&test.labels) {
        let scaled = artifacts.scaler.transform(row)?;
        let predicted = argmax(&artifacts.model.predict_proba(&scaled)?);
        if let Some(actual) = classes.iter().position(|c| c == label) {
            confusion_matrix[actual][predicted] += 1;
            if actual == predicted {
                correct += 1;
            }
        }
    }

    let accuracy = if test.is_empty() {
        0.0
    } else {
        correct as f64 / test.len() as f64
    };

    Ok(TrainingReport {
        accuracy,
        train_size,
        test_size: test.len(),
        classes,
        confusion_matrix,
    })
}

/// 拟合随机森林（自助采样 + 每次分裂随机 √n 个特征）
pub fn fit_forest(rows: &[Vec<f64>], labels: &[i64], params: &ForestParams) -> Result<ClassifierModel> {
    if rows.is_empty() || rows.len() != labels.len() {
        return Err(AppError::InvalidInput("training data is empty or misaligned".into()));
    }
    if params.n_estimators == 0 {
        return Err(AppError::InvalidInput("n_estimators must be positive".into()));
    }

    let mut classes = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let encoded: Vec<usize> = labels
        .iter()
        .map(|l| classes.iter().position(|c| c == l).unwrap_or(0))
        .collect();

    let n_features = rows[0].len();
    let max_features = ((n_features as f64).sqrt().round() as usize).clamp(1, n_features.max(1));
    let mut rng = StdRng::seed_from_u64(params.seed);

    let trees = (0..params.n_estimators)
        .map(|i| {
            let sample: Vec<usize> = (0..rows.len())
                .map(|_| rng.gen_range(0..rows.len()))
                .collect();
            let mut builder = TreeBuilder {
                rows,
                labels: &encoded,
                n_classes: classes.len(),
                max_features,
                params,
                nodes: Vec::new(),
            };
            builder.build(&sample, 0, &mut rng);
            debug!("Tree {} built with {} nodes", i, builder.nodes.len());
            DecisionTree {
                nodes: builder.nodes,
            }
        })
        .collect();

    Ok(ClassifierModel::RandomForest {
        classes,
        n_features,
        trees,
    })
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    max_features: usize,
    params: &'a ForestParams,
    nodes: Vec<TreeNode>,
}

impl TreeBuilder<'_> {
    fn counts(&self, sample: &[usize]) -> Vec<f64> {
        let mut counts = vec![0.0; self.n_classes];
        for &i in sample {
            counts[self.labels[i]] += 1.0;
        }
        counts
    }

    /// 构建子树，返回其根节点下标
    fn build(&mut self, sample: &[usize], depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.counts(sample);
        let pure = counts.iter().filter(|c| **c > 0.0).count() <= 1;

        if pure || depth >= self.params.max_depth || sample.len() < self.params.min_samples_split {
            return self.push(TreeNode::Leaf { value: counts });
        }

        let Some((feature, threshold)) = self.best_split(sample, &counts, rng) else {
            return self.push(TreeNode::Leaf { value: counts });
        };

        let (left, right): (Vec<usize>, Vec<usize>) = sample
            .iter()
            .partition(|&&i| self.rows[i][feature] <= threshold);

        // 先占位，子树建好后回填下标
        let index = self.push(TreeNode::Leaf { value: counts });
        let left = self.build(&left, depth + 1, rng);
        let right = self.build(&right, depth + 1, rng);
        self.nodes[index] = TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        };
        index
    }

    fn push(&mut self, node: TreeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn best_split(&self, sample: &[usize], counts: &[f64], rng: &mut StdRng) -> Option<(usize, f64)> {
        let n_features = self.rows[0].len();
        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(rng);
        features.truncate(self.max_features);

        let total = sample.len() as f64;
        let parent = gini(counts, total);
        let mut best: Option<(usize, f64, f64)> = None;

        for feature in features {
            let mut ordered: Vec<(f64, usize)> = sample
                .iter()
                .map(|&i| (self.rows[i][feature], self.labels[i]))
                .collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0.0; self.n_classes];
            let mut right = counts.to_vec();
            for k in 0..ordered.len() - 1 {
                let (value, label) = ordered[k];
                left[label] += 1.0;
                right[label] -= 1.0;

                let next = ordered[k + 1].0;
                if next <= value {
                    continue;
                }

                let n_left = (k + 1) as f64;
                let n_right = total - n_left;
                let impurity =
                    (n_left * gini(&left, n_left) + n_right * gini(&right, n_right)) / total;
                let gain = parent - impurity;

                if gain > 0.0 && best.is_none_or(|(_, _, g)| gain > g) {
                    best = Some((feature, (value + next) / 2.0, gain));
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}
