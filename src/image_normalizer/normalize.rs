use crate::image_normalizer::decoded_image::{DecodedImage, InvalidImageError};
use crate::image_normalizer::tensor::{NormalizedTensor, CHANNELS};
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

/// Per-channel scaling applied to each 0-255 intensity:
/// `(raw * scale - mean[c]) / std[c]`.
///
/// Must match the scaling the model was trained with. A mismatch does not
/// fail, it only makes predictions worse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub scale: f32,
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    /// Plain 0.0-255.0 floats, which is what a float TFLite image buffer holds.
    pub fn raw() -> Self {
        Self {
            scale: 1.0,
            mean: [0.0; 3],
            std: [1.0; 3],
        }
    }

    /// Min-max scaling into 0.0-1.0.
    pub fn unit() -> Self {
        Self {
            scale: 1.0 / 255.0,
            ..Self::raw()
        }
    }

    pub fn imagenet() -> Self {
        Self {
            scale: 1.0 / 255.0,
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    fn apply(&self, raw: u8, channel: usize) -> f32 {
        (raw as f32 * self.scale - self.mean[channel]) / self.std[channel]
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::raw()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    fn source_channels(&self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }
}

/// Resamples to exactly `target_width` x `target_height` with a bilinear
/// filter, ignoring aspect ratio, and lays the result out as HWC floats.
pub fn normalize(
    image: &DecodedImage,
    target_width: u32,
    target_height: u32,
    normalization: &Normalization,
    channel_order: ChannelOrder,
) -> Result<NormalizedTensor, InvalidImageError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(InvalidImageError::ZeroArea {
            width: image.width(),
            height: image.height(),
        });
    }
    if target_width == 0 || target_height == 0 {
        return Err(InvalidImageError::ZeroTarget {
            width: target_width,
            height: target_height,
        });
    }

    let rgb = image.as_dynamic().to_rgb8();
    let resized = if rgb.dimensions() == (target_width, target_height) {
        rgb
    } else {
        imageops::resize(&rgb, target_width, target_height, FilterType::Triangle)
    };

    let order = channel_order.source_channels();
    let (width, height) = (target_width as usize, target_height as usize);
    let mut data = Vec::with_capacity(width * height * CHANNELS);

    for pixel in resized.pixels() {
        for (channel, &source) in order.iter().enumerate() {
            data.push(normalization.apply(pixel[source], channel));
        }
    }

    Ok(NormalizedTensor::from_hwc(height, width, data))
}
