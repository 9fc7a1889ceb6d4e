//! Training configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// WDBC data file
    pub data_path: PathBuf,

    /// Where the fitted artifact is written
    pub output_path: PathBuf,

    /// Fraction of samples held out for evaluation
    pub test_size: f64,

    /// Seed for the train/test shuffle
    pub seed: u64,

    /// Gradient descent iterations
    pub max_iter: usize,

    pub learning_rate: f64,

    /// L2 regularization strength
    pub alpha: f64,

    /// Convergence tolerance on the gradient norm
    pub tol: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("wdbc.data"),
            output_path: PathBuf::from("modelo.json"),
            test_size: 0.2,
            seed: 42,
            max_iter: 5000,
            learning_rate: 0.1,
            alpha: 0.01,
            tol: 1e-6,
        }
    }
}

impl TrainingConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}
