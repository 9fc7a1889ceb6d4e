//! Tumor classifier CLI module
//!
//! Command-line interface for training the classifier, serving it over
//! HTTP and running one-off predictions from a JSON file.

use clap::{Parser, Subcommand};
use colored::*;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::inference::ModelArtifact;
use crate::server::{self, render_json, AppState, ServerConfig};
use crate::training::{TrainEngine, TrainingConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn metric_line(name: &str, value: f64) {
    println!("  {:<16} {}", muted(name), format!("{:.4}", value).white().bold());
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tumor-classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breast tumor malignancy classifier: training and HTTP inference")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit the classifier on the Breast Cancer Wisconsin dataset
    Train {
        /// WDBC data file (UCI wdbc.data or headered CSV)
        #[arg(short, long)]
        data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "modelo.json")]
        output: PathBuf,

        /// Fraction of samples held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Seed for the train/test split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Gradient descent iterations
        #[arg(long, default_value = "5000")]
        max_iter: usize,

        /// Append-only log file
        #[arg(long, env = "LOG_FILE", default_value = "training.log")]
        log_file: PathBuf,
    },

    /// Serve predictions over HTTP
    Serve {
        /// Server port
        #[arg(short, long, env = "API_PORT", default_value = "5000")]
        port: u16,

        /// Server host
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Trained model file
        #[arg(short, long, env = "MODEL_PATH", default_value = "modelo.json")]
        model: PathBuf,

        /// Require the canonical 30 feature names for named payloads
        #[arg(long, env = "STRICT_FEATURE_NAMES")]
        strict_feature_names: bool,

        /// Append-only log file
        #[arg(long, env = "LOG_FILE", default_value = "app.log")]
        log_file: PathBuf,
    },

    /// Run one prediction from a JSON payload file
    Predict {
        /// Trained model file
        #[arg(short, long, env = "MODEL_PATH", default_value = "modelo.json")]
        model: PathBuf,

        /// JSON payload in either accepted shape
        #[arg(short, long)]
        input: PathBuf,

        /// Require the canonical 30 feature names for named payloads
        #[arg(long)]
        strict_feature_names: bool,
    },
}

impl Commands {
    /// Log file for this command, if it writes one
    pub fn log_file(&self) -> Option<&Path> {
        match self {
            Commands::Train { log_file, .. } | Commands::Serve { log_file, .. } => Some(log_file),
            Commands::Predict { .. } => None,
        }
    }
}

// ─── Logging ───────────────────────────────────────────────────────────────────

/// Log to stdout and, when given, append to `log_file` without colors.
pub fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tumor_classifier=info,tower_http=info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;
    Ok(())
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data_path: &Path,
    output: &Path,
    test_size: f64,
    seed: u64,
    max_iter: usize,
) -> anyhow::Result<()> {
    section("Train");

    let config = TrainingConfig::new(data_path)
        .with_output(output)
        .with_test_size(test_size)
        .with_seed(seed)
        .with_max_iter(max_iter);

    step_run("Training logistic regression");
    let start = Instant::now();
    let report = TrainEngine::new(config).run()?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    println!(
        "  {:<16} {}",
        muted("Samples"),
        format!("{} train / {} test", report.n_train, report.n_test).white()
    );
    metric_line("Accuracy", report.metrics.accuracy);
    metric_line("F1-Score", report.metrics.f1_score);
    metric_line("Precision", report.metrics.precision);
    metric_line("Recall", report.metrics.recall);
    println!("  {:<16} {}", muted("Iterations"), report.converged_in.to_string().white());
    println!("  {:<16} {}", muted("Model"), report.output_path.white());
    println!();

    Ok(())
}

pub async fn cmd_serve(
    host: &str,
    port: u16,
    model: &Path,
    strict_feature_names: bool,
) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: host.to_string(),
        port,
        model_path: model.to_path_buf(),
        strict_feature_names,
    };
    server::run_server(config).await
}

/// Prints the same JSON body the HTTP endpoint would return.
pub fn cmd_predict(model: &Path, input: &Path, strict_feature_names: bool) -> anyhow::Result<()> {
    let artifact = ModelArtifact::load(model)?;
    let config = ServerConfig {
        model_path: model.to_path_buf(),
        strict_feature_names,
        ..ServerConfig::default()
    };
    let state = AppState::from_config(Arc::new(artifact), &config)?;

    let raw = std::fs::read(input)?;
    // Unparseable input is treated like an empty payload, as over HTTP.
    let value = serde_json::from_slice(&raw).unwrap_or(serde_json::Value::Null);

    match server::run_prediction(&state, value) {
        Ok(response) => {
            print!("{}", render_json(&response)?);
            Ok(())
        }
        Err(e) => {
            print!("{}", render_json(&serde_json::json!({ "error": e.client_message() }))?);
            anyhow::bail!("prediction failed: {}", e)
        }
    }
}
