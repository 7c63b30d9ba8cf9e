//! 离线训练：读取（或生成）数据集，训练随机森林并写出模型构件。

use anyhow::Context;
use seizureguard::config::loader::ConfigLoader;
use seizureguard::ml::{Dataset, ModelTrainer, generate_synthetic};
use seizureguard::observability::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let training = &config.training;
    if !training.dataset_path.exists() {
        anyhow::ensure!(
            training.generate_if_missing,
            "dataset not found: {}",
            training.dataset_path.display()
        );
        info!(
            "Generating synthetic dataset: {} samples x {} features",
            training.sample_count, training.sample_features
        );
        generate_synthetic(training.sample_count, training.sample_features, training.seed)?
            .write_csv(&training.dataset_path)
            .context("failed to write synthetic dataset")?;
        info!("Synthetic dataset saved to {}", training.dataset_path.display());
    }

    let dataset = Dataset::load(&training.dataset_path)
        .with_context(|| format!("failed to load {}", training.dataset_path.display()))?;

    let (artifacts, report) = ModelTrainer::from_config(training).run(&dataset)?;
    artifacts.save(&config.model).context("failed to save model artifacts")?;

    info!(
        "Training complete: accuracy {:.4} on {} test samples",
        report.accuracy, report.test_size
    );
    Ok(())
}
