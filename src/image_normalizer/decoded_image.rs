use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum InvalidImageError {
    #[error("image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("target size must be positive, got {width}x{height}")]
    ZeroTarget { width: u32, height: u32 },
    #[error("{channels} channels cannot be coerced to RGB")]
    UnsupportedChannels { channels: u8 },
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A fully materialized raster handed over by the image source.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Interleaved 8-bit pixels, row-major. 1 = luma, 2 = luma + alpha,
    /// 3 = RGB, 4 = RGBA.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, InvalidImageError> {
        if !(1..=4).contains(&channels) {
            return Err(InvalidImageError::UnsupportedChannels { channels });
        }

        let expected = width as usize * height as usize * channels as usize;
        let actual = pixels.len();
        if actual != expected {
            return Err(InvalidImageError::BufferLength { expected, actual });
        }

        let image = match channels {
            1 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
        };

        image
            .map(Self::new)
            .ok_or(InvalidImageError::BufferLength { expected, actual })
    }

    #[allow(dead_code)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidImageError> {
        Ok(Self::new(image::load_from_memory(bytes)?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, InvalidImageError> {
        Ok(Self::new(image::open(path)?))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
