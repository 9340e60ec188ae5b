use crate::adapter::{self, Prediction};
use crate::backend::ClassifierBackend;
use crate::error::{DiagnoseError, Result};
use crate::labels::{BodyPart, FractureStatus, ModelKey};
use crate::registry::ClassifierRegistry;
use preprocess::ImageTensor;
use std::path::Path;

/// Final combined output of one diagnosis run.
///
/// Constructed fresh per request from that request's predictions; never
/// persisted. The normal case reports no body part.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnosis {
    Normal,
    Fractured {
        body_part: BodyPart,
        confidence: f32,
    },
}

/// Orchestrates the two-stage diagnosis over the classifier registry.
pub struct DiagnosisEngine<B> {
    registry: ClassifierRegistry<B>,
}

impl<B> DiagnosisEngine<B> {
    pub fn new(registry: ClassifierRegistry<B>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClassifierRegistry<B> {
        &self.registry
    }
}

impl<B: ClassifierBackend> DiagnosisEngine<B> {
    /// Convenience wrapper: load and normalize the image file, then
    /// [`diagnose`](Self::diagnose). All file I/O happens here, before
    /// inference begins.
    pub fn diagnose_path(&self, path: impl AsRef<Path>) -> Result<Diagnosis> {
        let tensor = preprocess::load_image(path)?;
        self.diagnose(&tensor)
    }

    /// Two-stage diagnosis:
    ///
    /// 1. the body-part classifier proposes a provisional part P;
    /// 2. P's fracture classifier decides the status — normal ends the run
    ///    with no further classifier calls;
    /// 3. on a fracture signal, every part's fracture classifier is
    ///    consulted on its fractured-class confidence, and the most
    ///    confident specialist gives the final body part, overriding P when
    ///    another part scores higher.
    ///
    /// Step 1 only picks which classifier to ask first; the step-3 re-scan
    /// is the authoritative selector. Ties resolve to the first part in
    /// [`BodyPart::ALL`] order. Any classifier failure aborts the whole
    /// diagnosis; a partial result is never returned.
    pub fn diagnose(&self, tensor: &ImageTensor) -> Result<Diagnosis> {
        let span = tracing::debug_span!("diagnose");
        let _enter = span.enter();

        let parts = self.run(ModelKey::Parts, tensor)?;
        let provisional = BodyPart::from_index(parts.class_index)
            .ok_or_else(|| class_index_error(ModelKey::Parts, parts.class_index))?;
        tracing::debug!(part = provisional.as_str(), "Provisional body part");

        let status_key = ModelKey::Fracture(provisional);
        let status_prediction = self.run(status_key, tensor)?;
        let status = FractureStatus::from_index(status_prediction.class_index)
            .ok_or_else(|| class_index_error(status_key, status_prediction.class_index))?;

        if status == FractureStatus::Normal {
            tracing::debug!(part = provisional.as_str(), "No fracture detected");
            return Ok(Diagnosis::Normal);
        }

        let mut best_part = BodyPart::Elbow;
        let mut best_confidence = f32::NEG_INFINITY;
        for part in BodyPart::ALL {
            let prediction = self.run(ModelKey::Fracture(part), tensor)?;
            let confidence = prediction.probabilities[FractureStatus::Fractured.index()];
            tracing::trace!(part = part.as_str(), confidence, "Specialist re-check");

            // Strict `>` keeps the first part in enumeration order on ties
            if confidence > best_confidence {
                best_part = part;
                best_confidence = confidence;
            }
        }

        if !best_confidence.is_finite() {
            return Err(DiagnoseError::Inference(anyhow::anyhow!(
                "no specialist produced a finite fractured confidence"
            )));
        }

        tracing::debug!(
            part = best_part.as_str(),
            confidence = best_confidence,
            "Fracture detected"
        );

        Ok(Diagnosis::Fractured {
            body_part: best_part,
            confidence: best_confidence,
        })
    }

    fn run(&self, key: ModelKey, tensor: &ImageTensor) -> Result<Prediction> {
        adapter::infer(key, self.registry.model(key), tensor)
    }
}

#[cfg(feature = "ort-backend")]
impl DiagnosisEngine<crate::backend::ort::OrtBackend> {
    /// Build the production engine: load all four ONNX artifacts named by
    /// `config`. Fails fast with [`DiagnoseError::ModelLoad`] if any is
    /// missing or corrupt.
    pub fn from_config(config: &crate::config::RegistryConfig) -> Result<Self> {
        Ok(Self::new(ClassifierRegistry::load(config)?))
    }
}

fn class_index_error(key: ModelKey, index: usize) -> DiagnoseError {
    DiagnoseError::Inference(anyhow::anyhow!(
        "classifier '{}' predicted class index {} outside its label set",
        key.name(),
        index
    ))
}
