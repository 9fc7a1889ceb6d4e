//! Training engine implementation

use super::{LogisticRegression, ModelMetrics, TrainingConfig};
use crate::dataset::{self, Dataset, WdbcFormat};
use crate::error::Result;
use crate::inference::ModelArtifact;
use crate::preprocessing::StandardScaler;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub metrics: ModelMetrics,
    pub converged_in: usize,
    pub output_path: String,
}

/// Fits and serializes the tumor classifier
#[derive(Debug, Clone)]
pub struct TrainEngine {
    config: TrainingConfig,
}

impl TrainEngine {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Split, scale, fit and evaluate. Returns the artifact with its
    /// held-out metrics attached.
    pub fn fit(&self, data: &Dataset) -> Result<ModelArtifact> {
        let split = dataset::train_test_split(data, self.config.test_size, self.config.seed)?;
        info!(
            train_samples = split.train.n_samples(),
            test_samples = split.test.n_samples(),
            "Data split into training and test sets"
        );

        let start = Instant::now();
        let mut scaler = StandardScaler::new();
        let x_train = scaler.fit_transform(&split.train.x)?;

        let mut model = LogisticRegression::new()
            .with_max_iter(self.config.max_iter)
            .with_learning_rate(self.config.learning_rate)
            .with_alpha(self.config.alpha)
            .with_tol(self.config.tol);
        info!(max_iter = self.config.max_iter, "Fitting logistic regression");
        model.fit(&x_train, &split.train.y)?;
        let training_time_secs = start.elapsed().as_secs_f64();

        let x_test = scaler.transform(&split.test.x)?;
        let y_pred = model.predict(&x_test)?;
        let mut metrics = ModelMetrics::compute_classification(&split.test.y, &y_pred);
        metrics.training_time_secs = training_time_secs;

        info!(
            accuracy = %format!("{:.4}", metrics.accuracy),
            f1 = %format!("{:.4}", metrics.f1_score),
            precision = %format!("{:.4}", metrics.precision),
            recall = %format!("{:.4}", metrics.recall),
            iterations = model.n_iter,
            "Model trained"
        );

        let artifact = ModelArtifact::new(
            data.feature_names.clone(),
            data.class_names.clone(),
            scaler,
            model,
        )?
            .with_metrics(metrics);
        Ok(artifact)
    }

    /// Run the whole pipeline: load, fit, evaluate and save.
    pub fn run(&self) -> Result<TrainingReport> {
        let (data, format) = dataset::load_wdbc(&self.config.data_path)?;
        info!(
            path = %self.config.data_path.display(),
            samples = data.n_samples(),
            features = data.n_features(),
            malignant = data.n_positive(),
            uci_layout = format == WdbcFormat::Uci,
            "Breast Cancer Wisconsin dataset loaded"
        );

        let artifact = self.fit(&data)?;
        artifact.save(&self.config.output_path)?;
        info!(path = %self.config.output_path.display(), "Model serialized");

        let n_test = artifact.metrics.as_ref().map(|m| m.n_samples).unwrap_or(0);
        Ok(TrainingReport {
            n_samples: data.n_samples(),
            n_features: data.n_features(),
            n_train: data.n_samples() - n_test,
            n_test,
            metrics: artifact.metrics.clone().unwrap_or_default(),
            converged_in: artifact.model.n_iter,
            output_path: self.config.output_path.display().to_string(),
        })
    }
}
