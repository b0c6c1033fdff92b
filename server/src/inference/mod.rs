//! Inference Module - model loading and prediction
//!
//! The artifact is read once at startup and turned into an immutable
//! [`Classifier`] shared by every request.

pub mod layout;
pub mod artifact;
pub mod linear;
pub mod tree;
#[cfg(feature = "onnx")]
pub mod onnx;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub use layout::{FeatureRow, FEATURE_COUNT, FEATURE_LAYOUT};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model not found: {0}")]
    NotFound(String),

    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported artifact format_version {0}")]
    UnsupportedFormat(u32),

    #[error("feature layout mismatch at column {index}: expected `{expected}`, found `{found}`")]
    LayoutMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("unsupported model file `{0}`")]
    UnsupportedExtension(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A loaded model that predicts one class label per row
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ModelError>;
    fn info(&self) -> &ModelInfo;
}

/// Model metadata reported by `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub path: String,
    pub classes: Vec<i64>,
    pub feature_count: usize,
    pub layout_version: u8,
    pub layout_hash: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

impl ModelInfo {
    pub fn new(model_type: &str, path: &str, classes: Vec<i64>, sha256: String) -> Self {
        Self {
            model_type: model_type.to_string(),
            path: path.to_string(),
            classes,
            feature_count: FEATURE_COUNT,
            layout_version: layout::FEATURE_VERSION,
            layout_hash: format!("{:08x}", layout::layout_hash()),
            sha256,
            loaded_at: Utc::now(),
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a model artifact from disk.
///
/// `*.onnx` files need the `onnx` feature; anything else is read as a JSON
/// artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>, ModelError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    tracing::info!(path = %path_str, "Loading model");

    if !path.exists() {
        return Err(ModelError::NotFound(path_str));
    }

    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path_str.clone(),
        source,
    })?;
    let sha256 = hex::encode(Sha256::digest(&bytes));

    let is_onnx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false);

    let model: Arc<dyn Classifier> = if is_onnx {
        load_onnx(&path_str, &bytes, sha256)?
    } else {
        let artifact = artifact::ModelArtifact::from_slice(&bytes)?;
        Arc::new(artifact.into_classifier(&path_str, sha256)?)
    };

    let info = model.info();
    tracing::info!(
        "Model loaded: type={} classes={:?} sha256={}",
        info.model_type, info.classes, info.sha256
    );

    Ok(model)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &str, bytes: &[u8], sha256: String) -> Result<Arc<dyn Classifier>, ModelError> {
    Ok(Arc::new(onnx::OnnxClassifier::from_bytes(path, bytes, sha256)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &str, _bytes: &[u8], _sha256: String) -> Result<Arc<dyn Classifier>, ModelError> {
    Err(ModelError::UnsupportedExtension(format!(
        "{} (rebuild with `--features onnx`)",
        path
    )))
}

/// Index of the largest value; ties go to the lowest index
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LOGISTIC: &str = r#"{
        "format_version": 1,
        "model_type": "logistic_regression",
        "feature_names": ["age", "sex", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"],
        "classes": [0, 1],
        "coef": [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        "intercept": -30.0
    }"#;

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_load_json_model() {
        let file = write_temp(".json", LOGISTIC.as_bytes());
        let model = load_model(file.path()).unwrap();

        let info = model.info();
        assert_eq!(info.model_type, "logistic_regression");
        assert_eq!(info.classes, vec![0, 1]);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.sha256.len(), 64);

        let mut row = [0.0; FEATURE_COUNT];
        row[2] = 35.0;
        assert_eq!(model.predict(&row).unwrap(), 1);
        row[2] = 25.0;
        assert_eq!(model.predict(&row).unwrap(), 0);
    }

    #[test]
    fn test_missing_model() {
        let err = load_model("does/not/exist.json").err().unwrap();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_garbage_model() {
        let file = write_temp(".json", b"\x80\x04\x95 not json");
        let err = load_model(file.path()).err().unwrap();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_needs_feature() {
        let file = write_temp(".onnx", b"onnx");
        let err = load_model(file.path()).err().unwrap();
        assert!(matches!(err, ModelError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_argmax_ties_go_low() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[1.0]), 0);
    }
}
