//! Integration test: prediction API endpoints

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use ndarray::{Array1, Array2};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tumor_classifier::dataset::FEATURE_NAMES;
use tumor_classifier::inference::{Classifier, LabelMap};
use tumor_classifier::server::{
    create_router, AppState, JSON_CONTENT_TYPE, MSG_EMPTY_PAYLOAD, MSG_INTERNAL, MSG_NAMED_COUNT,
    MSG_POSITIONAL_COUNT,
};

/// P(malignant) is the first feature divided by 100.
struct FirstFeature;

impl Classifier for FirstFeature {
    fn predict(&self, x: &Array2<f64>) -> tumor_classifier::Result<Array1<usize>> {
        Ok(x.column(0).mapv(|v| usize::from(v / 100.0 > 0.5)))
    }

    fn predict_proba(&self, x: &Array2<f64>) -> tumor_classifier::Result<Array2<f64>> {
        let p1 = x.column(0).mapv(|v| (v / 100.0).clamp(0.0, 1.0));
        Ok(Array2::from_shape_fn((x.nrows(), 2), |(i, j)| {
            if j == 1 { p1[i] } else { 1.0 - p1[i] }
        }))
    }
}

fn test_app(strict: bool) -> axum::Router {
    let state = AppState::new(Arc::new(FirstFeature), LabelMap::DEFAULT, strict).unwrap();
    create_router(Arc::new(state))
}

fn features_with_first(first: f64) -> Vec<f64> {
    let mut values = vec![0.0; 30];
    values[0] = first;
    values
}

fn named_with_first(first: f64) -> Value {
    let mut map = serde_json::Map::new();
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        map.insert(name.to_string(), json!(if i == 0 { first } else { 0.0 }));
    }
    Value::Object(map)
}

async fn post_predict(app: axum::Router, body: impl Into<Body>) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn error_message(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_app(false)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        JSON_CONTENT_TYPE
    );

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    assert_eq!(
        String::from_utf8(bytes.to_vec()).unwrap(),
        "{\n    \"status\": \"OK\",\n    \"mensaje\": \"API en línea y a la espera\"\n}\n"
    );
}

#[tokio::test]
async fn test_positional_prediction() {
    let payload = json!({ "features": features_with_first(80.0) });
    let (status, body) = post_predict(test_app(false), payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "{\n    \"predicción\": \"Maligno\",\n    \"probabilidad\": 0.8\n}\n"
    );
}

#[tokio::test]
async fn test_benign_probability_is_for_predicted_class() {
    let payload = json!({ "features": features_with_first(10.0) });
    let (status, body) = post_predict(test_app(false), payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["predicción"], "Benigno");
    assert!((value["probabilidad"].as_f64().unwrap() - 0.9).abs() < 1e-12);
}

#[tokio::test]
async fn test_named_prediction() {
    let (status, body) = post_predict(test_app(false), named_with_first(75.0).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["predicción"], "Maligno");
    assert_eq!(value["probabilidad"], 0.75);
}

#[tokio::test]
async fn test_named_payload_uses_object_order_when_permissive() {
    // Arbitrary names are accepted; the first key feeds column 0.
    let mut map = serde_json::Map::new();
    map.insert("z".to_string(), json!(90.0));
    for i in 1..30 {
        map.insert(format!("f{}", i), json!(0.0));
    }
    let (status, body) = post_predict(test_app(false), Value::Object(map).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["predicción"], "Maligno");
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let payload = json!({ "features": features_with_first(62.5) }).to_string();
    let (_, first) = post_predict(test_app(false), payload.clone()).await;
    let (_, second) = post_predict(test_app(false), payload).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_object_rejected() {
    let (status, body) = post_predict(test_app(false), "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), MSG_EMPTY_PAYLOAD);
}

#[tokio::test]
async fn test_missing_or_invalid_body_rejected() {
    for body in ["", "null", "not json", "[1, 2, 3]"] {
        let (status, response) = post_predict(test_app(false), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(error_message(&response), MSG_EMPTY_PAYLOAD);
    }
}

#[tokio::test]
async fn test_short_named_payload_rejected() {
    let (status, body) = post_predict(test_app(false), r#"{"dato": [1, 2, 3]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "Formato inválido, se requieren 30 características con nombre"
    );

    let (status, body) = post_predict(test_app(false), r#"{"dato_incorrecto": 5}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), MSG_NAMED_COUNT);
}

#[tokio::test]
async fn test_wrong_positional_count_rejected() {
    for n in [29usize, 31, 0] {
        let payload = json!({ "features": vec![1.0; n] });
        let (status, body) = post_predict(test_app(false), payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "n = {}", n);
        assert_eq!(error_message(&body), MSG_POSITIONAL_COUNT);
    }

    let (status, body) = post_predict(test_app(false), r#"{"features": "x"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), MSG_POSITIONAL_COUNT);
}

#[tokio::test]
async fn test_non_numeric_feature_is_internal_error() {
    let mut values: Vec<Value> = (0..29).map(|i| json!(i)).collect();
    values.push(json!("a"));
    let payload = json!({ "features": values });

    let (status, body) = post_predict(test_app(false), payload.to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        "{\n    \"error\": \"Error interno en el servidor\"\n}\n"
    );
    assert_eq!(error_message(&body), MSG_INTERNAL);
}

#[tokio::test]
async fn test_strict_mode_rejects_unknown_names() {
    let mut map = serde_json::Map::new();
    for i in 0..30 {
        map.insert(format!("f{}", i), json!(1.0));
    }
    let (status, body) = post_predict(test_app(true), Value::Object(map).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).starts_with("Nombres de características no reconocidos: f0"));
}

#[tokio::test]
async fn test_strict_mode_reorders_named_features() {
    // Canonical names in reverse order still land in training column order.
    let mut map = serde_json::Map::new();
    for (i, name) in FEATURE_NAMES.iter().enumerate().rev() {
        map.insert(name.to_string(), json!(if i == 0 { 70.0 } else { 0.0 }));
    }
    let (status, body) = post_predict(test_app(true), Value::Object(map).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["predicción"], "Maligno");
    assert_eq!(value["probabilidad"], 0.7);
}

#[tokio::test]
async fn test_get_predict_not_allowed() {
    let response = test_app(false)
        .oneshot(Request::builder().uri("/predict").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let response = test_app(false)
        .oneshot(Request::builder().uri("/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    assert_eq!(error_message(std::str::from_utf8(&bytes).unwrap()), "Recurso no encontrado");
}

#[test]
fn test_inverted_label_order_fails_startup() {
    struct Inverted;
    impl Classifier for Inverted {
        fn predict(&self, x: &Array2<f64>) -> tumor_classifier::Result<Array1<usize>> {
            Ok(Array1::zeros(x.nrows()))
        }
        fn predict_proba(&self, x: &Array2<f64>) -> tumor_classifier::Result<Array2<f64>> {
            Ok(Array2::from_elem((x.nrows(), 2), 0.5))
        }
        fn class_names(&self) -> Vec<String> {
            vec!["malignant".to_string(), "benign".to_string()]
        }
    }
    assert!(AppState::new(Arc::new(Inverted), LabelMap::DEFAULT, false).is_err());
}
