//! Breast Cancer Wisconsin (Diagnostic) dataset
//!
//! Provides the canonical feature layout shared by training and serving,
//! loaders for the UCI `wdbc.data` file and headered CSV exports, and a
//! seeded train/test split.

mod wdbc;

pub use wdbc::{load_wdbc, WdbcFormat};

use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Number of morphological measurements per sample
pub const N_FEATURES: usize = 30;

/// Feature names in training column order: mean, standard error and worst
/// value of ten cell-nucleus measurements.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

/// Class names in index order. Index 1 is the positive (malignant) class.
pub const CLASS_NAMES: [&str; 2] = ["benign", "malignant"];

/// A labelled feature matrix
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    /// Class index per row into `class_names`
    pub y: Array1<f64>,
    pub feature_names: Vec<String>,
    /// Class names in the index order of `y`
    pub class_names: Vec<String>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<f64>, feature_names: Vec<String>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }
        if x.ncols() != feature_names.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} feature names", x.ncols()),
                actual: format!("{} feature names", feature_names.len()),
            });
        }
        Ok(Self {
            x,
            y,
            feature_names,
            class_names: CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Override the class order `y` is encoded in.
    pub fn with_class_names(mut self, class_names: Vec<String>) -> Result<Self> {
        if class_names.len() != 2 {
            return Err(ClassifierError::ShapeError {
                expected: "2 classes".to_string(),
                actual: format!("{} classes", class_names.len()),
            });
        }
        self.class_names = class_names;
        Ok(self)
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of rows labelled malignant
    pub fn n_positive(&self) -> usize {
        self.y.iter().filter(|&&v| v >= 0.5).count()
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
            class_names: self.class_names.clone(),
        }
    }
}

/// Result of a train/test split
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Shuffle rows with a seeded RNG and hold out `test_size` of them.
///
/// The test split gets `ceil(n * test_size)` rows, the rest go to training.
pub fn train_test_split(data: &Dataset, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ClassifierError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be in (0, 1)".to_string(),
        });
    }

    let n_samples = data.n_samples();
    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(ClassifierError::DataError(format!(
            "cannot split {} samples with test_size {}",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok(TrainTestSplit {
        train: data.select(train_idx),
        test: data.select(test_idx),
    })
}
