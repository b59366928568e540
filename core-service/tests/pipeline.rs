//! End-to-end tests: artifacts on disk → registry → submissions

use std::path::Path;

use disease_predict_core::logic::model::{sha256_hex, ArtifactFailure};
use disease_predict_core::{
    ArtifactSpec, DispatchError, FeatureVector, FormRegistry, Label, Pipeline, RegistryConfig,
    RegistryError, StartupError, SubmitError,
};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Linear model positive when the first feature exceeds `threshold`
fn threshold_model(n: usize, threshold: f64) -> serde_json::Value {
    let mut weights = vec![0.0; n];
    weights[0] = 1.0;
    json!({ "kind": "logistic_regression", "weights": weights, "intercept": -threshold })
}

fn write_models(dir: &Path) -> RegistryConfig {
    let forms = FormRegistry::builtin().unwrap();
    let mut config = RegistryConfig::new(dir);

    for (schema, _) in forms.iter() {
        let file = format!("{}_model.json", schema.id());
        let body = threshold_model(schema.len(), 100.0).to_string();
        std::fs::write(dir.join(&file), &body).unwrap();
        config = config.with_artifact(schema.id(), ArtifactSpec::new(file).with_sha256(sha256_hex(body.as_bytes())));
    }
    config
}

#[test]
fn test_diabetes_submission_end_to_end() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::from_config(&write_models(dir.path())).unwrap();

    let verdict = pipeline
        .submit("diabetes", &["5", "166", "72", "19", "175", "25.8", "0.587", "51"])
        .unwrap();
    assert_eq!(verdict.label, Label::Positive);
    assert_eq!(verdict.message, "The person is diabetic");

    let verdict = pipeline
        .submit("diabetes", &["5", "90", "72", "19", "175", "25.8", "0.587", "51"])
        .unwrap();
    assert_eq!(verdict.message, "The person is not diabetic");
}

#[test]
fn test_batched_validation_end_to_end() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::from_config(&write_models(dir.path())).unwrap();

    let err = pipeline
        .submit("diabetes", &["", "abc", "72", "19", "", "25.8", "0.587", "51"])
        .unwrap_err();
    let SubmitError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.missing.iter().copied().collect::<Vec<_>>(), vec![0, 4]);
    assert_eq!(errors.invalid.get(&1).map(String::as_str), Some("abc"));
}

#[test]
fn test_every_builtin_form_served() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::from_config(&write_models(dir.path())).unwrap();

    for (id, expected) in [
        ("heart", "No heart disease detected"),
        ("parkinsons", "Person is NOT likely to have Parkinson's disease"),
        ("breast_cancer", "Benign tumor"),
    ] {
        let n = pipeline.forms().schema(id).unwrap().len();
        let raw = vec!["1.5"; n];
        assert_eq!(pipeline.submit(id, &raw).unwrap().message, expected);
    }
    assert_eq!(pipeline.dispatcher().stats().inference_count, 3);
}

#[test]
fn test_dispatcher_rejects_short_vector() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::from_config(&write_models(dir.path())).unwrap();

    let short = FeatureVector::from(vec![1.0; 5]);
    let err = pipeline.dispatcher().predict("diabetes", &short).unwrap_err();
    assert!(matches!(err, DispatchError::FeatureLengthMismatch { expected: 8, actual: 5, .. }));
}

#[test]
fn test_scaled_model_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_models(dir.path());

    // Glucose standardized against training mean 120 / std 30
    let mut weights = vec![0.0; 8];
    weights[1] = 1.0;
    let model = json!({
        "kind": "svc_linear",
        "weights": weights,
        "intercept": -1.0,
        "scaler": { "mean": [0.0, 120.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], "scale": [1.0, 30.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0] }
    });
    std::fs::write(dir.path().join("scaled.json"), model.to_string()).unwrap();
    config = config.with_artifact("diabetes", ArtifactSpec::new("scaled.json"));

    let pipeline = Pipeline::from_config(&config).unwrap();
    let high = pipeline.submit("diabetes", &["0", "160", "70", "20", "85", "24.5", "0.45", "30"]).unwrap();
    let low = pipeline.submit("diabetes", &["0", "140", "70", "20", "85", "24.5", "0.45", "30"]).unwrap();
    assert!(high.is_positive());
    assert!(!low.is_positive());
}

#[test]
fn test_startup_fails_on_corrupt_artifact() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = write_models(dir.path());
    std::fs::write(dir.path().join("heart_model.json"), "tampered").unwrap();

    let Err(StartupError::Registry(RegistryError::Incomplete(failures))) = Pipeline::from_config(&config) else {
        panic!("startup should fail");
    };
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0], ArtifactFailure::Load { disease, .. } if disease == "heart"));
}

#[test]
fn test_startup_fails_on_mismatched_tumor_dimension() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_models(dir.path());
    // the 10-feature tumor model does not fit the 30-field form
    let body = threshold_model(10, 0.0).to_string();
    std::fs::write(dir.path().join("breast_cancer_model.json"), &body).unwrap();
    let config = config.with_artifact("breast_cancer", ArtifactSpec::new("breast_cancer_model.json"));

    let Err(StartupError::Registry(RegistryError::Incomplete(failures))) = Pipeline::from_config(&config) else {
        panic!("startup should fail");
    };
    assert!(matches!(
        failures[0],
        ArtifactFailure::DimensionMismatch { expected: 30, actual: 10, .. }
    ));
}

#[test]
fn test_startup_fails_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = RegistryConfig::new(dir.path());
    let Err(StartupError::Registry(RegistryError::Incomplete(failures))) = Pipeline::from_config(&config) else {
        panic!("startup should fail");
    };
    assert_eq!(failures.len(), 4);
}
