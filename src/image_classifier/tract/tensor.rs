use crate::image_classifier::interface::{InferenceError, ScoreVector};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_normalizer::tensor::NormalizedTensor;
use tract_onnx::prelude::*;

pub type TractPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Loads the ONNX model with its input pinned to `[1, height, width, 3]` f32.
pub fn load_plan(config: &ModelConfig) -> Result<TractPlan, InferenceError> {
    let (height, width) = config.input_shape;

    tract_onnx::onnx()
        .model_for_path(&config.onnx_model_path)
        .and_then(|model| {
            model.with_input_fact(0, f32::fact([1, height as usize, width as usize, 3]).into())
        })
        .and_then(|model| model.into_optimized())
        .and_then(|model| model.into_runnable())
        .map_err(|e| {
            InferenceError::Unavailable(format!(
                "failed to load {}: {}",
                config.onnx_model_path.display(),
                e
            ))
        })
}

pub fn check_shape(config: &ModelConfig, tensor: &NormalizedTensor) -> Result<(), InferenceError> {
    let expected = config.expected_tensor_shape();
    if tensor.shape() != expected {
        return Err(InferenceError::ShapeMismatch {
            expected,
            actual: tensor.shape(),
        });
    }
    Ok(())
}

/// HWC tensor -> NHWC tract tensor with a batch of one.
pub fn to_tract_tensor(tensor: &NormalizedTensor) -> Result<Tensor, InferenceError> {
    let [height, width, channels] = tensor.shape();
    let array =
        tract_ndarray::Array4::from_shape_vec((1, height, width, channels), tensor.as_slice().to_vec())
            .map_err(|e| InferenceError::Run(format!("failed to shape input tensor: {}", e)))?;

    Ok(array.into_tensor())
}

pub fn run_plan(plan: &TractPlan, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError> {
    let input = to_tract_tensor(tensor)?;
    let outputs = plan
        .run(tvec!(input.into_tvalue()))
        .map_err(|e| InferenceError::Run(e.to_string()))?;

    let output = outputs
        .first()
        .ok_or_else(|| InferenceError::Run("model produced no outputs".to_string()))?;
    let scores = output
        .to_array_view::<f32>()
        .map_err(|e| InferenceError::Run(format!("output is not f32: {}", e)))?;

    Ok(ScoreVector::new(scores.iter().copied().collect()))
}

/// A plan that scores each pixel by the sum of its three channels, so a
/// `height x width` input yields `height * width` scores.
#[cfg(test)]
pub fn channel_sum_plan(height: usize, width: usize) -> TractResult<TractPlan> {
    use tract_onnx::tract_core::ops::nn::{Reduce, Reducer};

    let mut model = TypedModel::default();
    let input = model.add_source("input", f32::fact([1, height, width, 3]))?;
    let scores = model.wire_node("scores", Reduce::new(tvec!(3), Reducer::Sum), &[input])?;
    model.set_output_outlets(&scores)?;
    model.into_runnable()
}
