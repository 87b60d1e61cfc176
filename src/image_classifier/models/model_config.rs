use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
}

impl ModelConfig {
    pub fn expected_tensor_shape(&self) -> [usize; 3] {
        [self.input_shape.0 as usize, self.input_shape.1 as usize, 3]
    }
}
