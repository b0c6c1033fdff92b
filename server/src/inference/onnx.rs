//! ONNX Runtime backend
//!
//! For classifiers converted with skl2onnx: one `float32[1, 10]` input,
//! the predicted `int64` label as first output.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::artifact::BINARY_CLASSES;
use super::{Classifier, FeatureRow, ModelError, ModelInfo, FEATURE_COUNT};

pub struct OnnxClassifier {
    // `Session::run` takes `&mut self`
    session: Mutex<Session>,
    label_output: String,
    info: ModelInfo,
}

impl OnnxClassifier {
    pub fn from_bytes(path: &str, bytes: &[u8], sha256: String) -> Result<Self, ModelError> {
        let session = Session::builder()
            .map_err(|e| ModelError::InvalidArtifact(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::InvalidArtifact(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(bytes)
            .map_err(|e| ModelError::InvalidArtifact(format!("Failed to load model: {}", e)))?;

        let label_output = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::InvalidArtifact("No output defined".to_string()))?;

        // Class labels are not recoverable from the graph without running it
        let info = ModelInfo::new("onnx", path, BINARY_CLASSES.to_vec(), sha256);

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            info,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ModelError> {
        let input: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), input)
            .map_err(|e| ModelError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.label_output)
            .ok_or_else(|| ModelError::Inference("No output".to_string()))?;

        let (_, labels) = output.try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Inference(format!("Extract error: {}", e)))?;

        let label = labels.first()
            .copied()
            .ok_or_else(|| ModelError::Inference("Empty label tensor".to_string()))?;

        if !BINARY_CLASSES.contains(&label) {
            return Err(ModelError::Inference(format!("Unexpected label {}", label)));
        }
        Ok(label)
    }

    fn info(&self) -> &ModelInfo {
        &self.info
    }
}
