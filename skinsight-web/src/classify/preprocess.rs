//! Image preprocessing for the classifier input
//!
//! Decode to RGB, resample to 224x224, scale each channel from [0, 255] to
//! [0.0, 1.0], and lay the pixels out row-major, channels last: a batch of
//! one image with shape (1, 224, 224, 3).

use image::imageops::{self, FilterType};
use image::ImageReader;
use std::io::Cursor;

use super::ClassifyError;

/// Spatial edge length the model was trained on
pub const INPUT_SIZE: u32 = 224;

/// RGB
pub const CHANNELS: usize = 3;

/// Normalized single-image batch in NHWC order
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Vec<f32>,
}

impl InputTensor {
    /// (batch, height, width, channels)
    pub const SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS];

    pub fn shape(&self) -> [usize; 4] {
        Self::SHAPE
    }

    /// Flat values, row-major with channels last
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Channel values of pixel (`x`, `y`)
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * INPUT_SIZE as usize + x) * CHANNELS;
        &self.data[start..start + CHANNELS]
    }

    /// One slice per image row, each holding `INPUT_SIZE` RGB triples
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(INPUT_SIZE as usize * CHANNELS)
    }
}

/// Turn encoded image bytes into the classifier input tensor
///
/// The format is sniffed from the content, not from any file name.
/// Nearest-neighbour resampling matches how the model's training images
/// were loaded.
pub fn preprocess(image_bytes: &[u8]) -> Result<InputTensor, ClassifyError> {
    let decoded = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()
        .map_err(|e| ClassifyError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| ClassifyError::Decode(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);

    let data = resized
        .into_raw()
        .into_iter()
        .map(|channel| f32::from(channel) / 255.0)
        .collect();

    Ok(InputTensor { data })
}
