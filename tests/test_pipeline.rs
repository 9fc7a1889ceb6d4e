//! Integration test: train, serialize, load and serve

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tumor_classifier::cli::cmd_predict;
use tumor_classifier::inference::{Classifier, ModelArtifact};
use tumor_classifier::server::{create_router, load_state, ServerConfig};
use tumor_classifier::training::{TrainEngine, TrainingConfig};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tumor-classifier-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A UCI-layout file with two separable clusters.
fn write_uci_file(path: &PathBuf, n: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut file = std::fs::File::create(path).unwrap();
    for i in 0..n {
        let malignant = i % 3 == 0;
        let base = if malignant { 18.0 } else { 9.0 };
        let values: Vec<String> = (0..30)
            .map(|j| format!("{:.4}", base * (1.0 + j as f64 / 10.0) + rng.gen_range(-1.5..1.5)))
            .collect();
        writeln!(
            file,
            "{},{},{}",
            842302 + i,
            if malignant { "M" } else { "B" },
            values.join(",")
        )
        .unwrap();
    }
}

fn train(dir: &PathBuf) -> (PathBuf, ModelArtifact) {
    let data = dir.join("wdbc.data");
    let model = dir.join("modelo.json");
    write_uci_file(&data, 150);

    let config = TrainingConfig::new(&data).with_output(&model).with_max_iter(1000);
    let report = TrainEngine::new(config).run().unwrap();
    assert_eq!(report.n_samples, 150);
    assert_eq!(report.n_features, 30);
    assert_eq!(report.n_test, 30);
    assert!(report.metrics.accuracy > 0.9, "accuracy = {}", report.metrics.accuracy);

    let artifact = ModelArtifact::load(&model).unwrap();
    (model, artifact)
}

#[test]
fn test_trained_artifact_round_trips() {
    let dir = temp_dir("roundtrip");
    let (_, artifact) = train(&dir);

    assert_eq!(artifact.feature_names.len(), 30);
    assert_eq!(artifact.class_names, vec!["benign", "malignant"]);
    assert_eq!(artifact.feature_names, Classifier::feature_names(&artifact));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_served_prediction_from_trained_model() {
    let dir = temp_dir("serve");
    let (model, _) = train(&dir);

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        model_path: model,
        strict_feature_names: false,
    };
    let state = load_state(&config).unwrap();
    let app = create_router(Arc::new(state));

    // Malignant-like row: every feature near the high cluster.
    let features: Vec<f64> = (0..30).map(|j| 18.0 * (1.0 + j as f64 / 10.0)).collect();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "features": features }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["predicción"], "Maligno");
    let p = value["probabilidad"].as_f64().unwrap();
    assert!((0.5..=1.0).contains(&p), "probabilidad = {}", p);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_strict_serving_uses_artifact_feature_names() {
    let dir = temp_dir("strict");
    let (model, _) = train(&dir);

    let config = ServerConfig {
        model_path: model,
        strict_feature_names: true,
        ..ServerConfig::default()
    };
    let state = load_state(&config).unwrap();
    assert!(state.normalizer.is_strict());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_predict_command() {
    let dir = temp_dir("predict-cmd");
    let (model, _) = train(&dir);

    let good = dir.join("good.json");
    let features: Vec<f64> = (0..30).map(|j| 9.0 * (1.0 + j as f64 / 10.0)).collect();
    std::fs::write(&good, json!({ "features": features }).to_string()).unwrap();
    assert!(cmd_predict(&model, &good, false).is_ok());

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"dato": [1, 2, 3]}"#).unwrap();
    assert!(cmd_predict(&model, &bad, false).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_data_file_fails() {
    let config = TrainingConfig::new("/nonexistent/wdbc.data");
    assert!(TrainEngine::new(config).run().is_err());
}
