use ndarray::Array4;
use std::path::Path;

#[cfg(feature = "ort-backend")]
pub mod ort;

/// An opaque classifier: maps the fixed-shape input tensor to a probability
/// vector over its label set.
///
/// Implementations need `&mut self` to run, so the registry wraps each
/// classifier in a mutex and serializes access per model.
pub trait ClassifierBackend {
    /// Load the classifier from its weight artifact.
    fn load_model(path: &Path) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run the classifier once on a `[1, 224, 224, 3]` input and return the
    /// class-probability vector.
    fn infer(&mut self, input: &Array4<f32>) -> anyhow::Result<Vec<f32>>;
}
