//! ONNX Classifier - ONNX Runtime integration
//!
//! Runs a classifier exported to ONNX (e.g. a scikit-learn pipeline with its
//! scaler) through `ort`. Input is a `[1, n]` f32 tensor. The first output
//! is read as one of:
//!
//! - an i64 class label (`[1]` or `[1, 1]`)
//! - a single f32 positive-class probability, thresholded at 0.5
//! - an f32 two-class row (`[1, 2]`), where the larger entry wins
//!
//! Any other output shape is an error.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{Classifier, ClassifierError};
use crate::logic::features::FeatureVector;
use crate::logic::schema::Label;

/// Score threshold when the model emits a float instead of a label
const SCORE_THRESHOLD: f32 = 0.5;

pub struct OnnxClassifier {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_name: String,
    input_dim: usize,
}

impl OnnxClassifier {
    /// Load ONNX model from bytes and probe it with a zero vector of
    /// `input_dim` features. A model that rejects that shape is refused.
    pub fn from_bytes(model_bytes: &[u8], input_dim: usize) -> Result<Self, String> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| format!("Session builder error: {}", e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| format!("Optimization error: {}", e))?
            .commit_from_memory(model_bytes)
            .map_err(|e| format!("Load from memory error: {}", e))?;

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| "No output defined".to_string())?;

        let classifier = Self { session: Mutex::new(session), output_name, input_dim };

        classifier
            .predict(&FeatureVector::new(vec![0.0; input_dim]))
            .map_err(|e| format!("model does not accept {} features: {}", input_dim, e))?;

        Ok(classifier)
    }

    fn run(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_f32())
            .map_err(|e| ClassifierError::Input(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError::Input(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ClassifierError::Output("No output".to_string()))?;

        if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            return label_from_class(labels);
        }

        let (shape, scores) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Output(format!("Extract error: {}", e)))?;
        let dims: Vec<i64> = shape.iter().copied().collect();

        label_from_scores(&dims, scores)
    }
}

/// Class-label output: exactly one class id
fn label_from_class(labels: &[i64]) -> Result<Label, ClassifierError> {
    match labels {
        [label] => Ok(Label::try_from(*label)?),
        _ => Err(ClassifierError::Output(format!(
            "expected one label, got {}",
            labels.len()
        ))),
    }
}

/// Score output: one positive-class probability, or a `[.., 2]` row of
/// per-class scores
fn label_from_scores(shape: &[i64], scores: &[f32]) -> Result<Label, ClassifierError> {
    let positive = match (shape.last(), scores) {
        (_, [score]) => *score > SCORE_THRESHOLD,
        (Some(2), [negative, positive]) => positive > negative,
        _ => {
            return Err(ClassifierError::Output(format!(
                "unsupported score shape {:?}",
                shape
            )))
        }
    };

    Ok(if positive { Label::Positive } else { Label::Negative })
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        if features.len() != self.input_dim {
            return Err(ClassifierError::Input(format!(
                "expected {} features, got {}",
                self.input_dim,
                features.len()
            )));
        }
        self.run(features)
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.input_dim)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ONNX graph builder (protobuf wire format, just the fields used here)
    // ========================================================================

    const FLOAT: u64 = 1;
    const INT64: u64 = 7;

    fn varint(buf: &mut Vec<u8>, mut v: u64) {
        while v >= 0x80 {
            buf.push((v as u8) | 0x80);
            v >>= 7;
        }
        buf.push(v as u8);
    }

    fn uint_field(buf: &mut Vec<u8>, field: u64, v: u64) {
        varint(buf, field << 3);
        varint(buf, v);
    }

    fn bytes_field(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
        varint(buf, (field << 3) | 2);
        varint(buf, data.len() as u64);
        buf.extend_from_slice(data);
    }

    /// ValueInfoProto for a tensor of fixed shape
    fn value_info(name: &str, elem_type: u64, dims: &[u64]) -> Vec<u8> {
        let mut shape = Vec::new();
        for &d in dims {
            let mut dim = Vec::new();
            uint_field(&mut dim, 1, d);
            bytes_field(&mut shape, 1, &dim);
        }
        let mut tensor = Vec::new();
        uint_field(&mut tensor, 1, elem_type);
        bytes_field(&mut tensor, 2, &shape);
        let mut ty = Vec::new();
        bytes_field(&mut ty, 1, &tensor);

        let mut info = Vec::new();
        bytes_field(&mut info, 1, name.as_bytes());
        bytes_field(&mut info, 2, &ty);
        info
    }

    /// Single-node model `Y = op(X)` with X: f32 `[1, width]`
    fn single_op_model(op: &str, attr_to: Option<u64>, width: u64, out_type: u64) -> Vec<u8> {
        let mut node = Vec::new();
        bytes_field(&mut node, 1, b"X");
        bytes_field(&mut node, 2, b"Y");
        bytes_field(&mut node, 4, op.as_bytes());
        if let Some(to) = attr_to {
            let mut attr = Vec::new();
            bytes_field(&mut attr, 1, b"to");
            uint_field(&mut attr, 3, to);
            uint_field(&mut attr, 20, 2);
            bytes_field(&mut node, 5, &attr);
        }

        let mut graph = Vec::new();
        bytes_field(&mut graph, 1, &node);
        bytes_field(&mut graph, 2, b"classifier");
        bytes_field(&mut graph, 11, &value_info("X", FLOAT, &[1, width]));
        bytes_field(&mut graph, 12, &value_info("Y", out_type, &[1, width]));

        let mut opset = Vec::new();
        uint_field(&mut opset, 2, 13);

        let mut model = Vec::new();
        uint_field(&mut model, 1, 8);
        bytes_field(&mut model, 7, &graph);
        bytes_field(&mut model, 8, &opset);
        model
    }

    /// Echoes its input as f32 scores
    fn score_model(width: u64) -> Vec<u8> {
        single_op_model("Identity", None, width, FLOAT)
    }

    /// Casts its single input to an i64 class label
    fn label_model() -> Vec<u8> {
        single_op_model("Cast", Some(INT64), 1, INT64)
    }

    fn predict(classifier: &OnnxClassifier, values: Vec<f64>) -> Result<Label, ClassifierError> {
        classifier.predict(&FeatureVector::new(values))
    }

    // ========================================================================
    // OUTPUT INTERPRETATION
    // ========================================================================

    #[test]
    fn test_two_class_row_uses_larger_entry() {
        assert_eq!(label_from_scores(&[1, 2], &[0.9, 0.1]).unwrap(), Label::Negative);
        assert_eq!(label_from_scores(&[1, 2], &[0.2, 0.8]).unwrap(), Label::Positive);
    }

    #[test]
    fn test_single_score_thresholded() {
        assert_eq!(label_from_scores(&[1, 1], &[0.7]).unwrap(), Label::Positive);
        assert_eq!(label_from_scores(&[1], &[0.5]).unwrap(), Label::Negative);
    }

    #[test]
    fn test_other_score_shapes_rejected() {
        assert!(matches!(label_from_scores(&[1, 3], &[0.1, 0.2, 0.7]), Err(ClassifierError::Output(_))));
        assert!(matches!(label_from_scores(&[2, 2], &[0.1, 0.9, 0.9, 0.1]), Err(ClassifierError::Output(_))));
        assert!(matches!(label_from_scores(&[1, 0], &[]), Err(ClassifierError::Output(_))));
    }

    #[test]
    fn test_class_label_output() {
        assert_eq!(label_from_class(&[1]).unwrap(), Label::Positive);
        assert_eq!(label_from_class(&[0]).unwrap(), Label::Negative);
        assert!(matches!(label_from_class(&[3]), Err(ClassifierError::Label(_))));
        assert!(matches!(label_from_class(&[0, 1]), Err(ClassifierError::Output(_))));
    }

    // ========================================================================
    // SESSION
    // ========================================================================

    #[test]
    fn test_rejects_garbage_bytes() {
        assert!(OnnxClassifier::from_bytes(b"not an onnx graph", 2).is_err());
    }

    #[test]
    fn test_probability_row_model() {
        let classifier = OnnxClassifier::from_bytes(&score_model(2), 2).unwrap();
        assert_eq!(classifier.input_dim(), Some(2));
        assert_eq!(classifier.kind(), "onnx");

        assert_eq!(predict(&classifier, vec![0.9, 0.1]).unwrap(), Label::Negative);
        assert_eq!(predict(&classifier, vec![0.1, 0.9]).unwrap(), Label::Positive);
    }

    #[test]
    fn test_single_score_model() {
        let classifier = OnnxClassifier::from_bytes(&score_model(1), 1).unwrap();
        assert_eq!(predict(&classifier, vec![0.7]).unwrap(), Label::Positive);
        assert_eq!(predict(&classifier, vec![0.3]).unwrap(), Label::Negative);
    }

    #[test]
    fn test_label_model() {
        let classifier = OnnxClassifier::from_bytes(&label_model(), 1).unwrap();
        assert_eq!(predict(&classifier, vec![1.0]).unwrap(), Label::Positive);
        assert_eq!(predict(&classifier, vec![0.0]).unwrap(), Label::Negative);
        assert!(matches!(predict(&classifier, vec![2.0]), Err(ClassifierError::Label(_))));
    }

    #[test]
    fn test_width_checked_at_load() {
        let err = OnnxClassifier::from_bytes(&score_model(2), 3).err().unwrap();
        assert!(err.contains("3 features"));
    }

    #[test]
    fn test_unsupported_output_shape_rejected_at_load() {
        assert!(OnnxClassifier::from_bytes(&score_model(3), 3).is_err());
    }

    #[test]
    fn test_wrong_length_vector_rejected() {
        let classifier = OnnxClassifier::from_bytes(&score_model(2), 2).unwrap();
        assert!(matches!(predict(&classifier, vec![0.5]), Err(ClassifierError::Input(_))));
    }
}
