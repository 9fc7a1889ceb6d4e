//! Evaluation metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Held-out evaluation of a binary classifier. Class 1 is the positive class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Training time in seconds
    pub training_time_secs: f64,
    /// Number of evaluated samples
    pub n_samples: usize,
}

impl ModelMetrics {
    /// Compute classification metrics from true labels and predicted class indices
    pub fn compute_classification(y_true: &Array1<f64>, y_pred: &Array1<usize>) -> Self {
        let mut metrics = Self {
            n_samples: y_true.len(),
            ..Self::default()
        };
        if y_true.is_empty() {
            return metrics;
        }

        let (tp, fp, tn, fn_) = Self::confusion_counts(y_true, y_pred);
        metrics.accuracy = (tp + tn) as f64 / y_true.len() as f64;

        metrics.precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };

        metrics.recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };

        let (p, r) = (metrics.precision, metrics.recall);
        metrics.f1_score = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };

        metrics
    }

    fn confusion_counts(y_true: &Array1<f64>, y_pred: &Array1<usize>) -> (usize, usize, usize, usize) {
        let mut tp = 0;
        let mut fp = 0;
        let mut tn = 0;
        let mut fn_ = 0;

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            match (*t > 0.5, *p == 1) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (false, false) => tn += 1,
                (true, false) => fn_ += 1,
            }
        }

        (tp, fp, tn, fn_)
    }
}
