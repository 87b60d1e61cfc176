/// Height x width x 3 floats, row-major with channels innermost (HWC).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

pub const CHANNELS: usize = 3;

impl NormalizedTensor {
    pub(super) fn from_hwc(height: usize, width: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), height * width * CHANNELS);
        Self {
            height,
            width,
            data,
        }
    }

    /// (height, width, channels)
    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, CHANNELS]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, y: usize, x: usize, c: usize) -> Option<f32> {
        if y >= self.height || x >= self.width || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width + x) * CHANNELS + c).copied()
    }
}
