use crate::backend::ClassifierBackend;
use crate::error::{DiagnoseError, Result};
use crate::labels::ModelKey;
use preprocess::ImageTensor;
use std::sync::Mutex;

/// One classifier invocation on one tensor: the argmax class index plus the
/// full probability vector it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub probabilities: Vec<f32>,
}

/// Run `model` once on `tensor` and reduce the output to a [`Prediction`].
///
/// The lock serializes access per classifier; the underlying session needs
/// exclusive access to run. The output must have exactly as many entries as
/// the model's label set — a short, long, or non-finite vector is an
/// inference failure, never a default answer.
pub fn infer<B: ClassifierBackend>(
    key: ModelKey,
    model: &Mutex<B>,
    tensor: &ImageTensor,
) -> Result<Prediction> {
    let mut guard = model.lock().map_err(|_| {
        DiagnoseError::Inference(anyhow::anyhow!(
            "classifier '{}' lock poisoned by an earlier panic",
            key.name()
        ))
    })?;

    let probabilities = guard.infer(tensor.as_array()).map_err(|source| {
        DiagnoseError::Inference(source.context(format!("classifier '{}'", key.name())))
    })?;
    drop(guard);

    let expected = key.class_count();
    if probabilities.len() != expected {
        return Err(DiagnoseError::Inference(anyhow::anyhow!(
            "classifier '{}' returned {} probabilities, expected {}",
            key.name(),
            probabilities.len(),
            expected
        )));
    }

    let class_index = argmax(&probabilities).ok_or_else(|| {
        DiagnoseError::Inference(anyhow::anyhow!(
            "classifier '{}' produced no finite probabilities",
            key.name()
        ))
    })?;

    Ok(Prediction {
        class_index,
        probabilities,
    })
}

/// Index of the largest finite probability; the earliest index wins ties.
fn argmax(probabilities: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &probability) in probabilities.iter().enumerate() {
        if !probability.is_finite() {
            continue;
        }
        match best {
            Some((_, best_probability)) if probability <= best_probability => {}
            _ => best = Some((index, probability)),
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::BodyPart;
    use ndarray::Array4;
    use std::path::Path;

    struct StubClassifier(Vec<f32>);

    impl ClassifierBackend for StubClassifier {
        fn load_model(_path: &Path) -> anyhow::Result<Self> {
            anyhow::bail!("stub classifiers are constructed directly")
        }

        fn infer(&mut self, _input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    impl ClassifierBackend for FailingClassifier {
        fn load_model(_path: &Path) -> anyhow::Result<Self> {
            anyhow::bail!("stub classifiers are constructed directly")
        }

        fn infer(&mut self, _input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
            anyhow::bail!("backend exploded")
        }
    }

    fn tensor() -> ImageTensor {
        let pixels =
            vec![0u8; preprocess::INPUT_WIDTH as usize * preprocess::INPUT_HEIGHT as usize * 3];
        preprocess::tensor_from_rgb(&pixels, preprocess::INPUT_WIDTH, preprocess::INPUT_HEIGHT)
            .unwrap()
    }

    #[test]
    fn test_infer_returns_argmax_and_full_vector() {
        let model = Mutex::new(StubClassifier(vec![0.1, 0.7, 0.2]));

        let prediction = infer(ModelKey::Parts, &model, &tensor()).unwrap();

        assert_eq!(prediction.class_index, 1);
        assert_eq!(prediction.probabilities, vec![0.1, 0.7, 0.2]);
    }

    #[test]
    fn test_infer_tie_prefers_earliest_class() {
        let model = Mutex::new(StubClassifier(vec![0.4, 0.4, 0.2]));

        let prediction = infer(ModelKey::Parts, &model, &tensor()).unwrap();

        assert_eq!(
            prediction.class_index, 0,
            "Equal probabilities should resolve to the first class"
        );
    }

    #[test]
    fn test_infer_rejects_wrong_vector_length() {
        let model = Mutex::new(StubClassifier(vec![0.5, 0.3, 0.2]));

        let result = infer(ModelKey::Fracture(BodyPart::Hand), &model, &tensor());

        match result {
            Err(DiagnoseError::Inference(cause)) => {
                let message = cause.to_string();
                assert!(
                    message.contains("returned 3 probabilities, expected 2"),
                    "Error should state actual and expected lengths: {message}"
                );
            }
            other => panic!("Expected Inference error, got {other:?}"),
        }
    }

    #[test]
    fn test_infer_rejects_non_finite_output() {
        let model = Mutex::new(StubClassifier(vec![f32::NAN, f32::INFINITY, f32::NAN]));

        let result = infer(ModelKey::Parts, &model, &tensor());

        // Infinity is not finite either, so no argmax candidate remains
        assert!(
            matches!(result, Err(DiagnoseError::Inference(_))),
            "All-non-finite output should be an inference failure"
        );
    }

    #[test]
    fn test_infer_skips_nan_entries_for_argmax() {
        let model = Mutex::new(StubClassifier(vec![f32::NAN, 0.3, 0.6]));

        let prediction = infer(ModelKey::Parts, &model, &tensor()).unwrap();

        assert_eq!(prediction.class_index, 2, "NaN entries never win the argmax");
    }

    #[test]
    fn test_infer_wraps_backend_failure_with_classifier_name() {
        let model = Mutex::new(FailingClassifier);

        let result = infer(ModelKey::Parts, &model, &tensor());

        match result {
            Err(DiagnoseError::Inference(cause)) => {
                let chain = format!("{cause:#}");
                assert!(
                    chain.contains("Parts") && chain.contains("backend exploded"),
                    "Cause chain should name the classifier and keep the source: {chain}"
                );
            }
            other => panic!("Expected Inference error, got {other:?}"),
        }
    }
}
