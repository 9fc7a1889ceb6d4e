//! Model training module
//!
//! The offline pipeline that produces the served artifact:
//! load the dataset, split it, scale, fit a logistic regression,
//! evaluate on the held-out split and serialize.

mod config;
mod engine;
mod models;
pub mod linear_models;

pub use config::TrainingConfig;
pub use engine::{TrainEngine, TrainingReport};
pub use linear_models::LogisticRegression;
pub use models::ModelMetrics;
