//! Dispatcher - feature vector → classifier → verdict
//!
//! Safe to call from any caller and any number of threads: the length check
//! runs here independently of the validator, and nothing it reads is ever
//! written after startup.

mod types;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::logic::features::FeatureVector;
use crate::logic::model::ModelRegistry;
use crate::logic::schema::FormRegistry;

pub use types::{DispatchError, DispatchStats, Verdict};

pub struct Dispatcher {
    forms: Arc<FormRegistry>,
    models: Arc<ModelRegistry>,

    // Latency stats
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    failure_count: AtomicU64,
}

impl Dispatcher {
    pub fn new(forms: Arc<FormRegistry>, models: Arc<ModelRegistry>) -> Self {
        Self {
            forms,
            models,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        }
    }

    pub fn forms(&self) -> &FormRegistry {
        &self.forms
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Run the disease's classifier and map its label to a verdict
    pub fn predict(&self, disease: &str, features: &FeatureVector) -> Result<Verdict, DispatchError> {
        let (schema, verdicts) = self.forms.get(disease)?;

        let classifier = self.models.get(disease).ok_or_else(|| {
            log::error!("Classifier for '{}' missing from a started registry", disease);
            DispatchError::ModelNotLoaded(disease.to_string())
        })?;

        if features.len() != schema.len() {
            return Err(DispatchError::FeatureLengthMismatch {
                disease: disease.to_string(),
                expected: schema.len(),
                actual: features.len(),
            });
        }

        let start_time = Instant::now();
        let result = classifier.predict(features);
        let elapsed = start_time.elapsed().as_micros() as u64;

        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        let label = result.map_err(|source| {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
            log::warn!("Classifier for '{}' failed: {}", disease, source);
            DispatchError::Classifier { disease: disease.to_string(), source }
        })?;

        log::debug!("Prediction for '{}': label {} in {}us", disease, label.as_u8(), elapsed);

        Ok(Verdict {
            disease: disease.to_string(),
            label,
            message: verdicts.message(label).to_string(),
        })
    }

    pub fn stats(&self) -> DispatchStats {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        DispatchStats {
            inference_count: count,
            failure_count: self.failure_count.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::logic::model::{Classifier, ClassifierError, ClassifierHandle};
    use crate::logic::schema::{FormRegistry, Label};

    /// Always answers the same label
    struct Fixed(Label, usize);

    impl Classifier for Fixed {
        fn predict(&self, _: &FeatureVector) -> Result<Label, ClassifierError> {
            Ok(self.0)
        }
        fn input_dim(&self) -> Option<usize> {
            Some(self.1)
        }
        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn predict(&self, _: &FeatureVector) -> Result<Label, ClassifierError> {
            Err(ClassifierError::Runtime("corrupted state".to_string()))
        }
        fn input_dim(&self) -> Option<usize> {
            None
        }
        fn kind(&self) -> &'static str {
            "broken"
        }
    }

    fn dispatcher_with(diabetes: ClassifierHandle) -> Dispatcher {
        let forms = FormRegistry::builtin().unwrap();
        let mut handles: HashMap<String, ClassifierHandle> = HashMap::new();
        handles.insert("diabetes".to_string(), diabetes);
        handles.insert("heart".to_string(), Arc::new(Fixed(Label::Negative, 13)));
        handles.insert("parkinsons".to_string(), Arc::new(Fixed(Label::Negative, 22)));
        handles.insert("breast_cancer".to_string(), Arc::new(Fixed(Label::Negative, 30)));

        let models = ModelRegistry::from_handles(&forms, handles).unwrap();
        Dispatcher::new(Arc::new(forms), Arc::new(models))
    }

    fn diabetes_vector() -> FeatureVector {
        vec![5.0, 166.0, 72.0, 19.0, 175.0, 25.8, 0.587, 51.0].into()
    }

    #[test]
    fn test_positive_label_maps_to_message() {
        let dispatcher = dispatcher_with(Arc::new(Fixed(Label::Positive, 8)));
        let verdict = dispatcher.predict("diabetes", &diabetes_vector()).unwrap();

        assert_eq!(verdict.label, Label::Positive);
        assert_eq!(verdict.message, "The person is diabetic");
        assert!(verdict.is_positive());
    }

    #[test]
    fn test_negative_label_maps_to_message() {
        let dispatcher = dispatcher_with(Arc::new(Fixed(Label::Negative, 8)));
        let verdict = dispatcher.predict("diabetes", &diabetes_vector()).unwrap();
        assert_eq!(verdict.message, "The person is not diabetic");
    }

    #[test]
    fn test_feature_length_mismatch() {
        let dispatcher = dispatcher_with(Arc::new(Fixed(Label::Positive, 8)));
        let short: FeatureVector = vec![1.0; 5].into();

        let err = dispatcher.predict("diabetes", &short).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::FeatureLengthMismatch { expected: 8, actual: 5, .. }
        ));
        assert!(!err.is_fatal());
        // never reached the classifier
        assert_eq!(dispatcher.stats().inference_count, 0);
    }

    #[test]
    fn test_unknown_disease() {
        let dispatcher = dispatcher_with(Arc::new(Fixed(Label::Positive, 8)));
        let err = dispatcher.predict("kidney", &diabetes_vector()).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownDisease(_)));
    }

    #[test]
    fn test_classifier_error_propagates() {
        let dispatcher = dispatcher_with(Arc::new(Broken));
        let err = dispatcher.predict("diabetes", &diabetes_vector()).unwrap_err();

        assert!(matches!(err, DispatchError::Classifier { .. }));
        let stats = dispatcher.stats();
        assert_eq!(stats.inference_count, 1);
        assert_eq!(stats.failure_count, 1);
    }

    #[test]
    fn test_model_not_loaded_is_fatal() {
        // Forms know a disease the model registry was never built for
        let forms = FormRegistry::builtin().unwrap();
        let empty_forms = FormRegistry::new(vec![]).unwrap();
        let models = ModelRegistry::from_handles(&empty_forms, HashMap::new()).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(forms), Arc::new(models));

        let err = dispatcher.predict("diabetes", &diabetes_vector()).unwrap_err();
        assert!(matches!(err, DispatchError::ModelNotLoaded(ref d) if d == "diabetes"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let dispatcher = dispatcher_with(Arc::new(Fixed(Label::Positive, 8)));
        let first = dispatcher.predict("diabetes", &diabetes_vector()).unwrap();
        for _ in 0..10 {
            assert_eq!(dispatcher.predict("diabetes", &diabetes_vector()).unwrap(), first);
        }
        assert_eq!(dispatcher.stats().inference_count, 11);
    }

    #[test]
    fn test_concurrent_predictions() {
        let dispatcher = Arc::new(dispatcher_with(Arc::new(Fixed(Label::Positive, 8))));

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = Arc::clone(&dispatcher);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| dispatcher.predict("diabetes", &diabetes_vector()).unwrap().label)
                        .all(|label| label == Label::Positive)
                })
            })
            .collect();

        for t in threads {
            assert!(t.join().unwrap());
        }
        assert_eq!(dispatcher.stats().inference_count, 400);
    }
}
