use crate::backend::ClassifierBackend;
use crate::config::RegistryConfig;
use crate::error::{DiagnoseError, Result};
use crate::labels::{BodyPart, ModelKey};
use std::sync::Mutex;

/// The four classifiers the diagnosis pipeline consults, loaded once at
/// startup and shared read-only for the process lifetime.
///
/// Each model sits behind its own mutex: the underlying session is not
/// reentrant, so the registry serializes access per classifier. Concurrent
/// diagnoses contend per model and never observe partial state.
pub struct ClassifierRegistry<B> {
    parts: Mutex<B>,
    elbow: Mutex<B>,
    hand: Mutex<B>,
    shoulder: Mutex<B>,
}

impl<B: ClassifierBackend> ClassifierRegistry<B> {
    /// Load all four classifiers from their weight artifacts.
    ///
    /// Any failure is fatal: the pipeline cannot serve with a partial
    /// registry.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        let load_one = |key: ModelKey| -> Result<Mutex<B>> {
            let path = config.model_path(key);
            tracing::info!(model = key.name(), path = %path.display(), "Loading classifier");

            let backend = B::load_model(&path).map_err(|source| DiagnoseError::ModelLoad {
                name: key.name(),
                path,
                source,
            })?;

            Ok(Mutex::new(backend))
        };

        let registry = Self {
            parts: load_one(ModelKey::Parts)?,
            elbow: load_one(ModelKey::Fracture(BodyPart::Elbow))?,
            hand: load_one(ModelKey::Fracture(BodyPart::Hand))?,
            shoulder: load_one(ModelKey::Fracture(BodyPart::Shoulder))?,
        };

        tracing::info!(
            models = ModelKey::NAMES.len(),
            "Classifier registry initialized"
        );

        Ok(registry)
    }
}

impl<B> ClassifierRegistry<B> {
    /// Assemble a registry from already-built classifiers.
    pub fn from_models(parts: B, elbow: B, hand: B, shoulder: B) -> Self {
        Self {
            parts: Mutex::new(parts),
            elbow: Mutex::new(elbow),
            hand: Mutex::new(hand),
            shoulder: Mutex::new(shoulder),
        }
    }

    pub fn model(&self, key: ModelKey) -> &Mutex<B> {
        match key {
            ModelKey::Parts => &self.parts,
            ModelKey::Fracture(BodyPart::Elbow) => &self.elbow,
            ModelKey::Fracture(BodyPart::Hand) => &self.hand,
            ModelKey::Fracture(BodyPart::Shoulder) => &self.shoulder,
        }
    }

    /// Look a classifier up by its public name.
    pub fn model_named(&self, name: &str) -> Result<&Mutex<B>> {
        let key = ModelKey::from_name(name)
            .ok_or_else(|| DiagnoseError::UnknownModel(name.to_string()))?;
        Ok(self.model(key))
    }
}
