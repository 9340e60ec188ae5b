use super::ClassifierBackend;
use ndarray::Array4;
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};
use std::path::Path;

/// ONNX Runtime classifier session.
///
/// Input and output names are read from the model's own metadata, so the
/// same backend serves all four artifacts regardless of how they were
/// exported.
pub struct OrtBackend {
    session: Session,
    input_name: String,
    output_name: String,
}

impl ClassifierBackend for OrtBackend {
    fn load_model(path: &Path) -> anyhow::Result<Self> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(path)?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model declares no inputs"))?;
        let output_name = session
            .outputs()
            .first()
            .map(|output| output.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model declares no outputs"))?;

        tracing::info!(
            path = %path.display(),
            input = %input_name,
            output = %output_name,
            "Model loaded"
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    fn infer(&mut self, input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(input.view())?
        ])?;

        let (_shape, data) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

        // Batch of one: flatten [1, num_classes] into the class vector.
        Ok(data.to_vec())
    }
}
