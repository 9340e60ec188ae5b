use crate::labels::{BodyPart, ModelKey};
use std::env;
use std::path::PathBuf;

pub use common::Environment;

/// Where the four weight artifacts live.
///
/// Location is configuration, not logic: the registry only consumes the
/// resolved paths.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub environment: Environment,
    pub weights_dir: PathBuf,
}

impl RegistryConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let weights_dir = env::var("WEIGHTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./weights"));

        Self {
            environment,
            weights_dir,
        }
    }

    pub fn with_weights_dir(weights_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment: Environment::from_env(),
            weights_dir: weights_dir.into(),
        }
    }

    /// Resolved artifact path for one classifier.
    pub fn model_path(&self, key: ModelKey) -> PathBuf {
        self.weights_dir.join(Self::weight_file(key))
    }

    fn weight_file(key: ModelKey) -> &'static str {
        match key {
            ModelKey::Parts => "ResNet50_BodyParts.onnx",
            ModelKey::Fracture(BodyPart::Elbow) => "ResNet50_Elbow_frac.onnx",
            ModelKey::Fracture(BodyPart::Hand) => "ResNet50_Hand_frac.onnx",
            ModelKey::Fracture(BodyPart::Shoulder) => "ResNet50_Shoulder_frac.onnx",
        }
    }
}
