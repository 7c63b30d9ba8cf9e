//! 机器学习模块
//!
//! 标准化器、分类模型、构件持久化以及离线训练。

pub mod artifacts;
pub mod classifier;
pub mod dataset;
pub mod scaler;
pub mod trainer;

pub use artifacts::ModelArtifacts;
pub use classifier::{ClassifierModel, DecisionTree, TreeNode};
pub use dataset::{Dataset, generate_synthetic};
pub use scaler::StandardScaler;
pub use trainer::{ForestParams, ModelTrainer, TrainingReport};
